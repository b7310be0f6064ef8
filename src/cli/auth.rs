use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_kv;
use crate::error::Result;
use crate::session::{
    clear_session, current_user, require_user, save_session, update_profile, Authenticator,
    MockAuthenticator, ProfileUpdate,
};

fn read_password(provided: Option<String>) -> Result<String> {
    match provided {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

pub fn login(email: &str, password: Option<String>) -> Result<()> {
    let password = read_password(password)?;
    let user = MockAuthenticator.login(email, &password)?;
    let kv = open_kv();
    save_session(&kv, &user)?;
    println!("{} Logged in as {} <{}>", "✓".green(), user.name, user.email);
    Ok(())
}

pub fn register(name: &str, email: &str, password: Option<String>) -> Result<()> {
    let password = read_password(password)?;
    let user = MockAuthenticator.register(name, email, &password)?;
    let kv = open_kv();
    save_session(&kv, &user)?;
    println!("{} Account created for {} <{}>", "✓".green(), user.name, user.email);
    Ok(())
}

pub fn logout() -> Result<()> {
    let kv = open_kv();
    match current_user(&kv) {
        Some(user) => {
            clear_session(&kv)?;
            println!("Logged out {}. Trip data is kept on disk.", user.email);
        }
        None => println!("No active session."),
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&user.name)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    table.add_row(vec![Cell::new("Position"), Cell::new(user.position.as_deref().unwrap_or(""))]);
    table.add_row(vec![
        Cell::new("Department"),
        Cell::new(user.department.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![
        Cell::new("Employee ID"),
        Cell::new(user.employee_id.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![
        Cell::new("Phone"),
        Cell::new(user.phone_number.as_deref().unwrap_or("")),
    ]);
    println!("Current User\n{table}");
    Ok(())
}

pub fn profile(
    name: Option<String>,
    position: Option<String>,
    department: Option<String>,
    employee_id: Option<String>,
    phone_number: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = update_profile(
        &kv,
        ProfileUpdate { name, position, department, employee_id, phone_number },
    )?;
    println!("{} Profile updated for {}", "✓".green(), user.email);
    Ok(())
}
