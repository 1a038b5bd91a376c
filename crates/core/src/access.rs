//! Role-based access control.
//!
//! The permission table in this module is the single source of truth for
//! which actions a role may perform. The shell consults it to decide which
//! menu entries to offer, and every core operation re-checks it before
//! touching any state, regardless of what the shell displayed.

use serde::Serialize;

/// Category of account, determining which actions a session may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Pharmacist,
    Accounts,
}

impl Role {
    /// Roles an administrator may assign when registering an employee.
    ///
    /// Additional Admin accounts are created through the directory directly,
    /// not through the employee registration flow.
    pub const ASSIGNABLE: &'static [Role] =
        &[Role::Doctor, Role::Nurse, Role::Pharmacist, Role::Accounts];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Nurse => "Nurse",
            Role::Pharmacist => "Pharmacist",
            Role::Accounts => "Accounts Manager",
        };
        f.write_str(label)
    }
}

/// Every operation a session can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateEmployee,
    DeleteEmployee,
    ListEmployees,
    RegisterPatient,
    ViewPatientBasic,
    ViewPatientFull,
    AddDiagnosis,
    AddMedicalNote,
    AddPrescription,
    AddBillingCharge,
    DispenseMedication,
    RecordPayment,
    SetBillStatus,
    ViewBillSummary,
    ChangeOwnCredential,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::CreateEmployee => "register employees",
            Action::DeleteEmployee => "delete employees",
            Action::ListEmployees => "view employees",
            Action::RegisterPatient => "register patients",
            Action::ViewPatientBasic => "view basic patient information",
            Action::ViewPatientFull => "view full patient records",
            Action::AddDiagnosis => "add diagnostic information",
            Action::AddMedicalNote => "add medical notes",
            Action::AddPrescription => "prescribe medication",
            Action::AddBillingCharge => "add billing charges",
            Action::DispenseMedication => "dispense medication",
            Action::RecordPayment => "record payments",
            Action::SetBillStatus => "set bill status",
            Action::ViewBillSummary => "view bill summaries",
            Action::ChangeOwnCredential => "change their own password",
        };
        f.write_str(label)
    }
}

const ADMIN_ACTIONS: &[Action] = &[
    Action::CreateEmployee,
    Action::DeleteEmployee,
    Action::ListEmployees,
    Action::ChangeOwnCredential,
];

const DOCTOR_ACTIONS: &[Action] = &[
    Action::ViewPatientBasic,
    Action::ViewPatientFull,
    Action::AddDiagnosis,
    Action::AddMedicalNote,
    Action::AddPrescription,
    Action::AddBillingCharge,
    Action::ChangeOwnCredential,
];

const NURSE_ACTIONS: &[Action] = &[
    Action::RegisterPatient,
    Action::ViewPatientBasic,
    Action::ChangeOwnCredential,
];

const PHARMACIST_ACTIONS: &[Action] = &[
    Action::ViewPatientFull,
    Action::DispenseMedication,
    Action::AddBillingCharge,
    Action::ChangeOwnCredential,
];

const ACCOUNTS_ACTIONS: &[Action] = &[
    Action::ViewBillSummary,
    Action::RecordPayment,
    Action::SetBillStatus,
    Action::ChangeOwnCredential,
];

/// The actions a role is permitted to perform.
pub fn permitted_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Admin => ADMIN_ACTIONS,
        Role::Doctor => DOCTOR_ACTIONS,
        Role::Nurse => NURSE_ACTIONS,
        Role::Pharmacist => PHARMACIST_ACTIONS,
        Role::Accounts => ACCOUNTS_ACTIONS,
    }
}

/// Whether `role` is permitted to perform `action`.
pub fn is_permitted(role: Role, action: Action) -> bool {
    permitted_actions(role).contains(&action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nurse_cannot_add_billing_charges() {
        assert!(!is_permitted(Role::Nurse, Action::AddBillingCharge));
    }

    #[test]
    fn doctor_can_add_billing_charges() {
        assert!(is_permitted(Role::Doctor, Action::AddBillingCharge));
    }

    #[test]
    fn every_role_can_change_its_own_password() {
        for role in [
            Role::Admin,
            Role::Doctor,
            Role::Nurse,
            Role::Pharmacist,
            Role::Accounts,
        ] {
            assert!(is_permitted(role, Action::ChangeOwnCredential), "{role}");
        }
    }

    #[test]
    fn admin_manages_accounts_but_not_patients() {
        assert!(is_permitted(Role::Admin, Action::CreateEmployee));
        assert!(is_permitted(Role::Admin, Action::DeleteEmployee));
        assert!(!is_permitted(Role::Admin, Action::RegisterPatient));
        assert!(!is_permitted(Role::Admin, Action::ViewPatientFull));
    }

    #[test]
    fn pharmacist_has_full_view_but_no_brief_listing() {
        assert!(is_permitted(Role::Pharmacist, Action::ViewPatientFull));
        assert!(!is_permitted(Role::Pharmacist, Action::ViewPatientBasic));
    }

    #[test]
    fn accounts_manager_owns_the_payment_side() {
        assert!(is_permitted(Role::Accounts, Action::RecordPayment));
        assert!(is_permitted(Role::Accounts, Action::SetBillStatus));
        assert!(is_permitted(Role::Accounts, Action::ViewBillSummary));
        assert!(!is_permitted(Role::Accounts, Action::AddBillingCharge));
    }
}
