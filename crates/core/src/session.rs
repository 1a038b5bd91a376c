//! Session coordination: authentication, role resolution, and gated
//! dispatch into the domain stores.

use ward_types::NonEmptyText;

use crate::access::{self, Action, Role};
use crate::billing::{BillStatus, BillSummary};
use crate::config::CoreConfig;
use crate::directory::{AccountBrief, AccountDirectory, AccountId};
use crate::error::{WardError, WardResult};
use crate::patient::{PatientBasic, PatientBrief, PatientId, PatientSnapshot};
use crate::registry::PatientRegistry;

/// Authentication state of the single interactive session.
#[derive(Debug, Clone)]
enum SessionState {
    LoggedOut,
    LoggedIn { username: String, role: Role },
}

/// Front door for the interactive shell.
///
/// Owns the account directory and the patient registry, and gates every
/// operation on the logged-in role via the access table. A denied request
/// returns an error without side effects. The shell may consult
/// [`SessionService::is_permitted`] to decide what to display, but every
/// operation here re-checks on its own.
#[derive(Debug)]
pub struct SessionService {
    directory: AccountDirectory,
    registry: PatientRegistry,
    state: SessionState,
}

impl SessionService {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            directory: AccountDirectory::new(cfg),
            registry: PatientRegistry::new(),
            state: SessionState::LoggedOut,
        }
    }

    /// Authenticates and opens a session, replacing any previous one.
    pub fn login(&mut self, username: &str, credential: &str) -> WardResult<Role> {
        match self.directory.authenticate(username, credential) {
            Ok(account) => {
                let role = account.role();
                self.state = SessionState::LoggedIn {
                    username: account.username().to_owned(),
                    role,
                };
                tracing::info!(username, %role, "login");
                Ok(role)
            }
            Err(err) => {
                tracing::warn!(username, "failed login attempt");
                Err(err)
            }
        }
    }

    /// Ends the session.
    pub fn logout(&mut self) {
        if let SessionState::LoggedIn { username, .. } = &self.state {
            tracing::info!(username = %username, "logout");
        }
        self.state = SessionState::LoggedOut;
    }

    /// Role of the logged-in account, if any.
    pub fn current_role(&self) -> Option<Role> {
        match &self.state {
            SessionState::LoggedIn { role, .. } => Some(*role),
            SessionState::LoggedOut => None,
        }
    }

    /// Username of the logged-in account, if any.
    pub fn current_user(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { username, .. } => Some(username),
            SessionState::LoggedOut => None,
        }
    }

    /// Whether the current session may perform `action`.
    ///
    /// Intended for menu filtering; every operation re-checks regardless.
    pub fn is_permitted(&self, action: Action) -> bool {
        matches!(
            &self.state,
            SessionState::LoggedIn { role, .. } if access::is_permitted(*role, action)
        )
    }

    /// Resolves the session identity and checks the access table.
    fn authorize(&self, action: Action) -> WardResult<(String, Role)> {
        let SessionState::LoggedIn { username, role } = &self.state else {
            return Err(WardError::NotLoggedIn);
        };
        if !access::is_permitted(*role, action) {
            tracing::warn!(username = %username, %role, %action, "action denied");
            return Err(WardError::PermissionDenied {
                role: *role,
                action,
            });
        }
        Ok((username.clone(), *role))
    }

    // ---- account operations ----

    pub fn create_account(
        &mut self,
        username: NonEmptyText,
        credential: NonEmptyText,
        role: Role,
    ) -> WardResult<AccountId> {
        self.authorize(Action::CreateEmployee)?;
        self.directory.create(username, credential, role)
    }

    /// Deletes an account.
    ///
    /// A session may never delete its own account, regardless of role; this
    /// is an identity check on top of the access table.
    pub fn delete_account(&mut self, username: &str) -> WardResult<()> {
        let (own_username, _) = self.authorize(Action::DeleteEmployee)?;
        if own_username == username {
            return Err(WardError::SelfDeletionForbidden);
        }
        self.directory.delete(username)
    }

    pub fn list_accounts(&self) -> WardResult<Vec<AccountBrief>> {
        self.authorize(Action::ListEmployees)?;
        Ok(self.directory.list())
    }

    /// Changes the credential of the logged-in account.
    pub fn change_own_credential(&mut self, credential: NonEmptyText) -> WardResult<()> {
        let (username, _) = self.authorize(Action::ChangeOwnCredential)?;
        self.directory.set_credential(&username, credential)
    }

    /// Whether a username is already taken. Menu convenience only; account
    /// creation re-checks under the uniqueness invariant.
    pub fn username_taken(&self, username: &str) -> bool {
        self.directory.exists(username)
    }

    // ---- patient operations ----

    pub fn register_patient(
        &mut self,
        name: NonEmptyText,
        age: u32,
        gender: NonEmptyText,
        symptoms: NonEmptyText,
        admission_date: NonEmptyText,
    ) -> WardResult<PatientId> {
        self.authorize(Action::RegisterPatient)?;
        if age == 0 {
            return Err(WardError::InvalidInput(
                "age must be greater than zero".into(),
            ));
        }
        Ok(self
            .registry
            .register(name, age, gender, symptoms, admission_date))
    }

    pub fn list_patients_brief(&self) -> WardResult<Vec<PatientBrief>> {
        self.authorize(Action::ViewPatientBasic)?;
        Ok(self.registry.list_brief())
    }

    pub fn patient_basic_view(&self, id: PatientId) -> WardResult<PatientBasic> {
        self.authorize(Action::ViewPatientBasic)?;
        Ok(self.registry.get(id)?.basic())
    }

    pub fn patient_full_view(&self, id: PatientId) -> WardResult<PatientSnapshot> {
        self.authorize(Action::ViewPatientFull)?;
        Ok(self.registry.get(id)?.snapshot())
    }

    pub fn add_diagnosis(&mut self, id: PatientId, text: &str) -> WardResult<()> {
        self.authorize(Action::AddDiagnosis)?;
        self.registry.get_mut(id)?.add_diagnosis(text);
        Ok(())
    }

    pub fn add_medical_note(&mut self, id: PatientId, text: &str) -> WardResult<()> {
        self.authorize(Action::AddMedicalNote)?;
        self.registry.get_mut(id)?.add_medical_note(text);
        Ok(())
    }

    pub fn add_prescription(&mut self, id: PatientId, text: &str) -> WardResult<()> {
        self.authorize(Action::AddPrescription)?;
        self.registry.get_mut(id)?.add_prescription(text);
        Ok(())
    }

    /// Records a dispensed medication into the patient's prescription list.
    pub fn dispense_medication(&mut self, id: PatientId, details: &str) -> WardResult<()> {
        self.authorize(Action::DispenseMedication)?;
        self.registry.get_mut(id)?.add_prescription(details);
        Ok(())
    }

    // ---- billing operations ----

    pub fn add_charge(
        &mut self,
        id: PatientId,
        description: NonEmptyText,
        amount: f64,
    ) -> WardResult<()> {
        self.authorize(Action::AddBillingCharge)?;
        self.registry.get_mut(id)?.bill_mut().add_charge(description, amount);
        Ok(())
    }

    pub fn record_payment(
        &mut self,
        id: PatientId,
        method: NonEmptyText,
        amount: f64,
    ) -> WardResult<()> {
        self.authorize(Action::RecordPayment)?;
        self.registry.get_mut(id)?.bill_mut().add_payment(method, amount);
        Ok(())
    }

    pub fn set_bill_status(&mut self, id: PatientId, status: BillStatus) -> WardResult<()> {
        self.authorize(Action::SetBillStatus)?;
        self.registry.get_mut(id)?.bill_mut().set_status(status);
        Ok(())
    }

    pub fn bill_summary(&self, id: PatientId) -> WardResult<BillSummary> {
        self.authorize(Action::ViewBillSummary)?;
        Ok(self.registry.get(id)?.bill().summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("non-empty")
    }

    fn service() -> SessionService {
        SessionService::new(&CoreConfig::new(text("admin"), text("admin123")))
    }

    fn login(service: &mut SessionService, username: &str, credential: &str) -> Role {
        service
            .login(username, credential)
            .expect("expected login to succeed")
    }

    fn register_jane(service: &mut SessionService) -> PatientId {
        service
            .register_patient(
                text("Jane"),
                30,
                text("Female"),
                text("Fever"),
                text("2026-08-07"),
            )
            .expect("expected registration to succeed")
    }

    #[test]
    fn operations_require_a_session() {
        let mut service = service();
        assert!(matches!(
            service.list_accounts(),
            Err(WardError::NotLoggedIn)
        ));
        assert!(matches!(
            service.add_diagnosis(PatientId::from(1), "Flu"),
            Err(WardError::NotLoggedIn)
        ));
        assert!(!service.is_permitted(Action::ListEmployees));
    }

    #[test]
    fn login_failure_leaves_session_logged_out() {
        let mut service = service();
        assert!(matches!(
            service.login("admin", "wrong"),
            Err(WardError::AuthFailed)
        ));
        assert!(service.current_role().is_none());
    }

    #[test]
    fn logout_revokes_permissions() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        assert!(service.is_permitted(Action::CreateEmployee));

        service.logout();
        assert!(!service.is_permitted(Action::CreateEmployee));
        assert!(service.current_user().is_none());
    }

    #[test]
    fn denied_actions_have_no_side_effect() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        service
            .create_account(text("n1"), text("pw"), Role::Nurse)
            .expect("nurse account");
        service.logout();

        login(&mut service, "n1", "pw");
        let patient = register_jane(&mut service);

        // A nurse may not touch billing; the attempt must not change the bill.
        let err = service
            .add_charge(patient, text("Consultation"), 100.0)
            .expect_err("expected denial");
        assert!(matches!(
            err,
            WardError::PermissionDenied {
                role: Role::Nurse,
                action: Action::AddBillingCharge
            }
        ));

        let basic = service
            .patient_basic_view(patient)
            .expect("nurse can view basic info");
        assert_eq!(basic.name.as_str(), "Jane");
        service.logout();

        login(&mut service, "admin", "admin123");
        service
            .create_account(text("acc1"), text("pw"), Role::Accounts)
            .expect("accounts account");
        service.logout();

        login(&mut service, "acc1", "pw");
        let summary = service.bill_summary(patient).expect("bill summary");
        assert_eq!(summary.total_charges, 0.0);
        assert_eq!(summary.status, BillStatus::Pending);
    }

    #[test]
    fn self_deletion_is_forbidden() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        let err = service
            .delete_account("admin")
            .expect_err("expected self-deletion to fail");
        assert!(matches!(err, WardError::SelfDeletionForbidden));
        assert!(service.username_taken("admin"));
    }

    #[test]
    fn duplicate_account_creation_leaves_directory_unchanged() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        let err = service
            .create_account(text("admin"), text("pw"), Role::Doctor)
            .expect_err("expected duplicate to fail");
        assert!(matches!(err, WardError::DuplicateUsername(_)));
        assert_eq!(service.list_accounts().expect("listing").len(), 1);
    }

    #[test]
    fn changed_password_applies_to_next_login() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        service
            .change_own_credential(text("rotated"))
            .expect("expected change to succeed");
        service.logout();

        assert!(matches!(
            service.login("admin", "admin123"),
            Err(WardError::AuthFailed)
        ));
        login(&mut service, "admin", "rotated");
    }

    #[test]
    fn dispensing_records_into_prescriptions() {
        let mut service = service();
        login(&mut service, "admin", "admin123");
        service
            .create_account(text("n1"), text("pw"), Role::Nurse)
            .expect("nurse");
        service
            .create_account(text("ph1"), text("pw"), Role::Pharmacist)
            .expect("pharmacist");
        service.logout();

        login(&mut service, "n1", "pw");
        let patient = register_jane(&mut service);
        service.logout();

        login(&mut service, "ph1", "pw");
        service
            .dispense_medication(patient, "Paracetamol 500mg")
            .expect("expected dispensing to succeed");
        let record = service
            .patient_full_view(patient)
            .expect("pharmacist can view full record");
        assert_eq!(record.prescriptions, vec!["Paracetamol 500mg"]);
    }

    #[test]
    fn admission_to_settlement_walkthrough() {
        let mut service = service();

        login(&mut service, "admin", "admin123");
        service
            .create_account(text("n1"), text("pw"), Role::Nurse)
            .expect("nurse");
        service
            .create_account(text("d1"), text("pw"), Role::Doctor)
            .expect("doctor");
        service
            .create_account(text("acc1"), text("pw"), Role::Accounts)
            .expect("accounts");
        service.logout();

        login(&mut service, "n1", "pw");
        let patient = register_jane(&mut service);
        assert_eq!(patient.value(), 1);
        service.logout();

        login(&mut service, "d1", "pw");
        service
            .add_charge(patient, text("Consultation"), 100.0)
            .expect("doctor adds a charge");
        let record = service.patient_full_view(patient).expect("full view");
        assert_eq!(record.bill.balance, 100.0);
        assert_eq!(record.bill.status, BillStatus::Pending);
        service.logout();

        login(&mut service, "acc1", "pw");
        service
            .record_payment(patient, text("Cash"), 100.0)
            .expect("payment recorded");
        let summary = service.bill_summary(patient).expect("summary");
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.status, BillStatus::FullyCleared);
    }
}
