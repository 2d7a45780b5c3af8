//! Interactive console flow for booking appointments and checking their
//! status.
//!
//! The flow is generic over its input and output streams so the whole
//! dialogue can be driven from a script in tests.

use std::io::{self, BufRead, Write};

use strum::IntoEnumIterator;

use crate::client::api::{BookingClient, BookingPayload};
use crate::client::session::{BookingForm, City, Mode, SessionState, DEFAULT_OTP};
use crate::error::Result;

/// Run the interactive console client until the user quits or input
/// reaches EOF.
pub async fn run<R: BufRead, W: Write>(
    client: &BookingClient,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut session = SessionState::new();

    writeln!(output, "==========================================")?;
    writeln!(output, "AADHAR APPOINTMENT BOOKING")?;
    writeln!(output, "==========================================")?;

    loop {
        writeln!(output)?;
        writeln!(output, "[1] Book appointment  [2] Check status  [q] Quit")?;
        let Some(choice) = prompt(input, output, "> ")? else {
            break;
        };

        match parse_menu(&choice) {
            Some(MenuAction::Quit) => break,
            Some(MenuAction::Mode(Mode::Book)) => {
                session.enter_book_mode();
                run_booking_form(client, &mut session, input, output).await?;
            }
            Some(MenuAction::Mode(Mode::Status)) => {
                session.enter_status_mode();
                run_status_check(client, &mut session, input, output).await?;
            }
            None => writeln!(output, "Please choose 1, 2 or q.")?,
        }
    }

    writeln!(output, "Goodbye.")?;
    Ok(())
}

enum MenuAction {
    Mode(Mode),
    Quit,
}

fn parse_menu(line: &str) -> Option<MenuAction> {
    match line.trim() {
        "1" => Some(MenuAction::Mode(Mode::Book)),
        "2" => Some(MenuAction::Mode(Mode::Status)),
        "q" | "Q" | "quit" | "exit" => Some(MenuAction::Quit),
        other => other.parse::<Mode>().ok().map(MenuAction::Mode),
    }
}

/// Collect the booking form, fetch the dependent center list, submit,
/// and render the outcome.
async fn run_booking_form<R: BufRead, W: Write>(
    client: &BookingClient,
    session: &mut SessionState,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "--- Book your Aadhar appointment ---")?;

    let Some(name) = prompt(input, output, "Name: ")? else {
        return Ok(());
    };
    session.form.name = name;

    let Some(mobile_number) = prompt(input, output, "Mobile number: ")? else {
        return Ok(());
    };
    session.form.mobile_number = mobile_number;

    let Some(address) = prompt(input, output, "Address: ")? else {
        return Ok(());
    };
    session.form.address = address;

    writeln!(output, "City:")?;
    for (i, city) in City::iter().enumerate() {
        writeln!(output, "  [{}] {}", i + 1, city)?;
    }
    let Some(city) = read_city(input, output)? else {
        return Ok(());
    };
    session.select_city(city);

    // The center options depend on the chosen city.
    let centers = match client.aadhar_centers(&city.to_string()).await {
        Ok(centers) => centers,
        Err(err) => {
            writeln!(output, "{err}")?;
            return Ok(());
        }
    };
    if centers.is_empty() {
        writeln!(output, "No Aadhar centers available in {city}.")?;
        return Ok(());
    }
    session.set_centers(centers);

    writeln!(output, "Aadhar center:")?;
    for (i, center) in session.centers.iter().enumerate() {
        writeln!(output, "  [{}] {}", i + 1, center)?;
    }
    let Some(center) = read_center(input, output, &session.centers)? else {
        return Ok(());
    };
    session.select_center(&center);

    if !session.form.is_complete() {
        writeln!(output, "Please fill all the fields.")?;
        return Ok(());
    }

    let payload = booking_payload(&session.form);
    match client.book_appointment(&payload).await {
        Ok(confirmation) => {
            let message = format!(
                "Appointment successfully booked for {}. \
                 Your appointment is scheduled for {}. \
                 Your appointment is at the {} Aadhar center in {}.",
                session.form.name, confirmation.appointment_date, center, city
            );
            writeln!(output, "{message}")?;
            session.confirm_booking(message);
        }
        Err(err) => writeln!(output, "{err}")?,
    }

    Ok(())
}

/// Ask for a mobile number and render the appointment booked under it.
async fn run_status_check<R: BufRead, W: Write>(
    client: &BookingClient,
    session: &mut SessionState,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "--- Check your appointment status ---")?;

    let Some(mobile_number) = prompt(input, output, "Mobile number: ")? else {
        return Ok(());
    };
    if mobile_number.is_empty() {
        writeln!(output, "Please enter your mobile number.")?;
        return Ok(());
    }
    session.status_number = mobile_number.clone();

    match client.appointment_status(&mobile_number).await {
        Ok(report) => writeln!(
            output,
            "Hello {}, your appointment is scheduled for {}.",
            report.name, report.appointment_date
        )?,
        Err(err) => writeln!(output, "{err}")?,
    }

    Ok(())
}

fn booking_payload(form: &BookingForm) -> BookingPayload {
    BookingPayload {
        name: form.name.clone(),
        mobile_number: form.mobile_number.clone(),
        otp: DEFAULT_OTP.to_string(),
        address: form.address.clone(),
        aadhar_center: form.aadhar_center.clone().unwrap_or_default(),
    }
}

/// Write a prompt and read one trimmed line. `None` means EOF.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Read a city choice by list number or name.
fn read_city<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<City>> {
    loop {
        let Some(line) = prompt(input, output, "Select a city: ")? else {
            return Ok(None);
        };

        if let Ok(index) = line.parse::<usize>() {
            if let Some(city) = City::iter().nth(index.wrapping_sub(1)) {
                return Ok(Some(city));
            }
        } else if let Ok(city) = line.parse::<City>() {
            return Ok(Some(city));
        }

        writeln!(output, "Please select a valid city.")?;
    }
}

/// Read a center choice by list number or exact name.
fn read_center<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    centers: &[String],
) -> io::Result<Option<String>> {
    loop {
        let Some(line) = prompt(input, output, "Select a center: ")? else {
            return Ok(None);
        };

        if let Ok(index) = line.parse::<usize>() {
            if let Some(center) = centers.get(index.wrapping_sub(1)) {
                return Ok(Some(center.clone()));
            }
        } else if let Some(center) = centers.iter().find(|c| c.eq_ignore_ascii_case(&line)) {
            return Ok(Some(center.clone()));
        }

        writeln!(output, "Please select a valid center.")?;
    }
}
