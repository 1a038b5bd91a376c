//! Interactive console shell.
//!
//! All terminal I/O lives here: prompts, input-validation loops, menu
//! rendering, and record formatting. The core is driven purely through
//! [`SessionService`] and re-checks permissions on every call; the menu
//! filtering below only decides what to offer.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use ward_core::{
    Action, BillStatus, BillSummary, PatientBasic, PatientId, PatientSnapshot, Role,
    SessionService,
};
use ward_types::NonEmptyText;

/// Menu entries offered to a logged-in session, filtered by the access
/// table. Per-role menus are never hard-coded.
const MENU: &[(&str, Action)] = &[
    ("Register employee", Action::CreateEmployee),
    ("Delete employee", Action::DeleteEmployee),
    ("View all employees", Action::ListEmployees),
    ("Register new patient", Action::RegisterPatient),
    ("View patients (brief) / basic information", Action::ViewPatientBasic),
    ("View full patient record", Action::ViewPatientFull),
    ("Add diagnostic information", Action::AddDiagnosis),
    ("Add medical notes", Action::AddMedicalNote),
    ("Prescribe medication", Action::AddPrescription),
    ("Record medication dispensed", Action::DispenseMedication),
    ("Add billing entry (consultation/tests/medication)", Action::AddBillingCharge),
    ("View complete patient bill", Action::ViewBillSummary),
    ("Record payment made", Action::RecordPayment),
    ("Mark bill status manually", Action::SetBillStatus),
    ("Change my password", Action::ChangeOwnCredential),
];

pub fn run(mut session: SessionService) -> anyhow::Result<()> {
    loop {
        println!();
        println!("=== Ward Console ===");
        println!("1. Login");
        println!("2. Exit");
        match read_choice("Choose an option: ", 1, 2)? {
            1 => login_flow(&mut session)?,
            _ => {
                println!("Exiting. Goodbye.");
                return Ok(());
            }
        }
    }
}

fn login_flow(session: &mut SessionService) -> anyhow::Result<()> {
    let username = read_non_empty("Username: ")?;
    let password = read_non_empty("Password: ")?;
    match session.login(username.as_str(), password.as_str()) {
        Ok(role) => {
            println!("Login successful. Welcome, {username} ({role})");
            session_menu(session)?;
            session.logout();
            println!("Logged out.");
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn session_menu(session: &mut SessionService) -> anyhow::Result<()> {
    loop {
        let entries: Vec<(&str, Action)> = MENU
            .iter()
            .copied()
            .filter(|(_, action)| session.is_permitted(*action))
            .collect();
        let role = session
            .current_role()
            .map(|r| r.to_string())
            .unwrap_or_default();

        println!();
        println!("--- {role} Menu ---");
        for (index, (label, _)) in entries.iter().enumerate() {
            println!("{}. {label}", index + 1);
        }
        println!("{}. Logout (Back)", entries.len() + 1);

        let choice = read_choice("Choose an option: ", 1, entries.len() + 1)?;
        if choice == entries.len() + 1 {
            return Ok(());
        }
        dispatch(session, entries[choice - 1].1)?;
    }
}

fn dispatch(session: &mut SessionService, action: Action) -> anyhow::Result<()> {
    match action {
        Action::CreateEmployee => create_employee(session),
        Action::DeleteEmployee => delete_employee(session),
        Action::ListEmployees => list_employees(session),
        Action::RegisterPatient => register_patient(session),
        Action::ViewPatientBasic => view_patient_basic(session),
        Action::ViewPatientFull => view_patient_full(session),
        Action::AddDiagnosis | Action::AddMedicalNote | Action::AddPrescription => {
            add_clinical_entry(session, action)
        }
        Action::DispenseMedication => dispense_medication(session),
        Action::AddBillingCharge => add_billing_charge(session),
        Action::ViewBillSummary => view_bill(session),
        Action::RecordPayment => record_payment(session),
        Action::SetBillStatus => set_bill_status(session),
        Action::ChangeOwnCredential => change_password(session),
    }
}

// ---- account handlers ----

fn create_employee(session: &mut SessionService) -> anyhow::Result<()> {
    let username = read_non_empty("Enter username for employee: ")?;
    if session.username_taken(username.as_str()) {
        println!("Username already exists.");
        return Ok(());
    }
    println!("Select role:");
    for (index, role) in Role::ASSIGNABLE.iter().enumerate() {
        println!("{}. {role}", index + 1);
    }
    let choice = read_choice("Choose role: ", 1, Role::ASSIGNABLE.len())?;
    let role = Role::ASSIGNABLE[choice - 1];
    let password = read_non_empty("Set password for employee: ")?;

    match session.create_account(username.clone(), password, role) {
        Ok(_) => println!("Employee registered: {username} ({role})"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn delete_employee(session: &mut SessionService) -> anyhow::Result<()> {
    list_employees(session)?;
    let target = read_non_empty("Enter username to delete (or type 'back' to cancel): ")?;
    if target.as_str() == "back" {
        return Ok(());
    }
    match session.delete_account(target.as_str()) {
        Ok(()) => println!("Deleted user: {target}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn list_employees(session: &mut SessionService) -> anyhow::Result<()> {
    match session.list_accounts() {
        Ok(accounts) => {
            println!("---- Registered Employees ----");
            for account in accounts {
                println!("Username: {} | Role: {}", account.username, account.role);
            }
            println!("------------------------------");
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn change_password(session: &mut SessionService) -> anyhow::Result<()> {
    let password = read_non_empty("Enter new password: ")?;
    match session.change_own_credential(password) {
        Ok(()) => println!("Password updated."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

// ---- patient handlers ----

fn register_patient(session: &mut SessionService) -> anyhow::Result<()> {
    let name = read_non_empty("Full name: ")?;
    let age = read_age()?;
    let gender = read_non_empty("Gender: ")?;
    let symptoms = read_non_empty("Symptoms: ")?;
    let admission_date = read_admission_date()?;

    match session.register_patient(name, age, gender, symptoms, admission_date) {
        Ok(id) => println!("Patient registered with ID: {id}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn view_patient_basic(session: &mut SessionService) -> anyhow::Result<()> {
    match session.list_patients_brief() {
        Ok(patients) => {
            println!("---- Patients (brief) ----");
            for patient in patients {
                println!("ID: {} | Name: {}", patient.id, patient.name);
            }
            println!("--------------------------");
        }
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    }
    let Some(id) = read_patient_id(true)? else {
        return Ok(());
    };
    match session.patient_basic_view(id) {
        Ok(patient) => print_basic(&patient),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn view_patient_full(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(true)? else {
        return Ok(());
    };
    match session.patient_full_view(id) {
        Ok(record) => {
            print_full_record(&record);
            let answer = read_allow_empty("Export this record as JSON? [y/N]: ")?;
            if answer.eq_ignore_ascii_case("y") {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn add_clinical_entry(session: &mut SessionService, action: Action) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    let (prompt_text, confirmation) = match action {
        Action::AddDiagnosis => ("Enter diagnostic information: ", "Diagnosis added."),
        Action::AddMedicalNote => ("Enter medical note: ", "Medical note added."),
        _ => ("Enter prescription details: ", "Prescription recorded."),
    };
    let text = read_non_empty(prompt_text)?;
    let outcome = match action {
        Action::AddDiagnosis => session.add_diagnosis(id, text.as_str()),
        Action::AddMedicalNote => session.add_medical_note(id, text.as_str()),
        _ => session.add_prescription(id, text.as_str()),
    };
    match outcome {
        Ok(()) => println!("{confirmation}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn dispense_medication(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    let details = read_non_empty("Enter medication details dispensed: ")?;
    match session.dispense_medication(id, details.as_str()) {
        Ok(()) => println!("Medication dispensed and recorded."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

// ---- billing handlers ----

fn add_billing_charge(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    let description = read_non_empty("Charge description (e.g., Consultation, X-ray): ")?;
    let amount = read_amount("Amount: $")?;
    match session.add_charge(id, description, amount) {
        Ok(()) => println!("Charge added to bill."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn view_bill(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    match session.bill_summary(id) {
        Ok(summary) => print_bill_summary(&summary),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn record_payment(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    let method = read_non_empty("Payment method (e.g., Cash/Card/Insurance): ")?;
    let amount = read_amount("Amount paid: $")?;
    match session.record_payment(id, method, amount) {
        Ok(()) => println!("Payment recorded."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn set_bill_status(session: &mut SessionService) -> anyhow::Result<()> {
    let Some(id) = read_patient_id(false)? else {
        return Ok(());
    };
    println!("Select status:");
    println!("1. Fully cleared");
    println!("2. Partially paid");
    println!("3. Pending");
    let status = match read_choice("Choose: ", 1, 3)? {
        1 => BillStatus::FullyCleared,
        2 => BillStatus::PartiallyPaid,
        _ => BillStatus::Pending,
    };
    match session.set_bill_status(id, status) {
        Ok(()) => println!("Bill status updated."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

// ---- record formatting ----

fn print_basic(patient: &PatientBasic) {
    println!("Patient ID: {}", patient.id);
    println!(
        "Name: {}, Age: {}, Gender: {}",
        patient.name, patient.age, patient.gender
    );
    println!("Symptoms: {}", patient.symptoms);
    println!("Date of admission: {}", patient.admission_date);
}

fn print_full_record(record: &PatientSnapshot) {
    println!("Patient ID: {}", record.id);
    println!(
        "Name: {}, Age: {}, Gender: {}",
        record.name, record.age, record.gender
    );
    println!("Symptoms: {}", record.symptoms);
    println!("Date of admission: {}", record.admission_date);
    print_list("Diagnoses:", &record.diagnoses);
    print_list("Medical Notes:", &record.notes);
    print_list("Prescriptions:", &record.prescriptions);
    print_bill_summary(&record.bill);
}

fn print_list(header: &str, entries: &[String]) {
    println!("{header}");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  - {entry}");
    }
}

fn print_bill_summary(bill: &BillSummary) {
    println!("---- Bill Summary ----");
    println!("Charges:");
    if bill.charges.is_empty() {
        println!("  (none)");
    }
    for charge in &bill.charges {
        println!("  {} : ${:.2}", charge.description, charge.amount);
    }
    println!("Payments:");
    if bill.payments.is_empty() {
        println!("  (none)");
    }
    for payment in &bill.payments {
        println!("  {} : ${:.2}", payment.method, payment.amount);
    }
    println!("Total Charges: ${:.2}", bill.total_charges);
    println!("Total Payments: ${:.2}", bill.total_payments);
    println!("Balance: ${:.2}", bill.balance);
    println!("Status: {}", bill.status);
    println!("----------------------");
}

// ---- input helpers ----

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn read_line_raw() -> anyhow::Result<String> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn read_allow_empty(prompt_text: &str) -> anyhow::Result<String> {
    prompt(prompt_text)?;
    read_line_raw()
}

fn read_non_empty(prompt_text: &str) -> anyhow::Result<NonEmptyText> {
    loop {
        prompt(prompt_text)?;
        match NonEmptyText::new(read_line_raw()?) {
            Ok(text) => return Ok(text),
            Err(_) => println!("Input cannot be empty. Try again."),
        }
    }
}

fn read_choice(prompt_text: &str, min: usize, max: usize) -> anyhow::Result<usize> {
    loop {
        prompt(prompt_text)?;
        match read_line_raw()?.trim().parse::<usize>() {
            Ok(choice) if (min..=max).contains(&choice) => return Ok(choice),
            Ok(_) => println!("Enter a number between {min} and {max}."),
            Err(_) => println!("Invalid input. Enter a number."),
        }
    }
}

/// Reads a patient id. With `allow_cancel`, an entry of 0 returns `None`.
fn read_patient_id(allow_cancel: bool) -> anyhow::Result<Option<PatientId>> {
    let prompt_text = if allow_cancel {
        "Enter patient ID (0 to cancel): "
    } else {
        "Enter patient ID: "
    };
    loop {
        prompt(prompt_text)?;
        match read_line_raw()?.trim().parse::<u64>() {
            Ok(0) if allow_cancel => return Ok(None),
            Ok(id) if id > 0 => return Ok(Some(PatientId::from(id))),
            _ => println!("Invalid patient ID."),
        }
    }
}

fn read_age() -> anyhow::Result<u32> {
    loop {
        prompt("Age: ")?;
        match read_line_raw()?.trim().parse::<u32>() {
            Ok(age) if age > 0 => return Ok(age),
            _ => println!("Invalid age."),
        }
    }
}

fn read_amount(prompt_text: &str) -> anyhow::Result<f64> {
    loop {
        prompt(prompt_text)?;
        match read_line_raw()?.trim().parse::<f64>() {
            Ok(amount) if amount > 0.0 => return Ok(amount),
            _ => println!("Invalid amount."),
        }
    }
}

/// Reads an admission date in YYYY-MM-DD form; blank input means today.
fn read_admission_date() -> anyhow::Result<NonEmptyText> {
    loop {
        let input = read_allow_empty("Date of admission (YYYY-MM-DD, blank for today): ")?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(NonEmptyText::new(
                Local::now().date_naive().format("%Y-%m-%d").to_string(),
            )?);
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => return Ok(NonEmptyText::new(date.format("%Y-%m-%d").to_string())?),
            Err(_) => println!("Invalid date. Use YYYY-MM-DD."),
        }
    }
}
