//! Interactive menu over a schedule store.
//!
//! Collects raw user input, calls the store operations, and renders the
//! results. Every store error is recoverable here: it is printed and the
//! menu comes back. The loop is generic over its input and output streams
//! so tests can drive it with in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::domain::{NewVehicle, Vehicle, VehicleChange};
use crate::store::ScheduleStore;

const MENU: &str = "\n=== Vehicle schedule ===\n\
    1. Add vehicle\n\
    2. Remove vehicle\n\
    3. Update vehicle\n\
    4. List all vehicles\n\
    5. Find by departure time\n\
    0. Quit";

/// Run the menu loop until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    store: &mut ScheduleStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "> ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add(store, input, out)?,
            "2" => remove(store, input, out)?,
            "3" => update(store, input, out)?,
            "4" => list(store, out)?,
            "5" => find(store, input, out)?,
            "0" => break,
            "" => {}
            other => writeln!(out, "Unknown choice: {}", other)?,
        }
    }
    writeln!(out, "Bye.")?;
    Ok(())
}

/// Write a prompt and read one trimmed line; `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Blank input stands for "no value" on the optional fields.
fn optional(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn add<R: BufRead, W: Write>(
    store: &mut ScheduleStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "Id: ")? else {
        return Ok(());
    };
    let Some(operator) = prompt(input, out, "Operator: ")? else {
        return Ok(());
    };
    let Some(route) = prompt(input, out, "Route: ")? else {
        return Ok(());
    };
    let Some(departure) = prompt(input, out, "Departure (HH:MM): ")? else {
        return Ok(());
    };
    let Some(arrival) = prompt(input, out, "Arrival (HH:MM, blank if unknown): ")? else {
        return Ok(());
    };
    let Some(note) = prompt(input, out, "Note (blank for none): ")? else {
        return Ok(());
    };

    let new = NewVehicle {
        id,
        operator,
        route,
        departure,
        arrival: optional(arrival),
        note: optional(note),
    };

    match store.add(new) {
        Ok(()) => writeln!(out, "Added."),
        Err(e) => writeln!(out, "Error: {}", e),
    }
}

fn remove<R: BufRead, W: Write>(
    store: &mut ScheduleStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "Id: ")? else {
        return Ok(());
    };
    match store.remove(&id) {
        Ok(true) => writeln!(out, "Removed."),
        Ok(false) => writeln!(out, "No vehicle with id {}.", id),
        Err(e) => writeln!(out, "Error: {}", e),
    }
}

fn update<R: BufRead, W: Write>(
    store: &mut ScheduleStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "Id: ")? else {
        return Ok(());
    };
    let Some(field) = prompt(
        input,
        out,
        "Field (operator/route/departure/arrival/note): ",
    )?
    else {
        return Ok(());
    };
    let Some(value) = prompt(input, out, "New value (blank clears arrival/note): ")? else {
        return Ok(());
    };

    let change = match field.as_str() {
        "operator" => VehicleChange::Operator(value),
        "route" => VehicleChange::Route(value),
        "departure" => VehicleChange::Departure(value),
        "arrival" => VehicleChange::Arrival(optional(value)),
        "note" => VehicleChange::Note(optional(value)),
        other => {
            return writeln!(
                out,
                "Unknown field {}; expected operator, route, departure, arrival or note.",
                other
            );
        }
    };

    match store.update(&id, vec![change]) {
        Ok(true) => writeln!(out, "Updated."),
        Ok(false) => writeln!(out, "No vehicle with id {}.", id),
        Err(e) => writeln!(out, "Error: {}", e),
    }
}

fn list<W: Write>(store: &ScheduleStore, out: &mut W) -> io::Result<()> {
    if store.is_empty() {
        return writeln!(out, "Schedule is empty.");
    }
    for vehicle in store.list_all() {
        writeln!(out, "{}", render(vehicle))?;
    }
    Ok(())
}

fn find<R: BufRead, W: Write>(
    store: &ScheduleStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(time) = prompt(input, out, "Departure time (HH:MM): ")? else {
        return Ok(());
    };
    match store.find_by_time(&time) {
        Ok(found) if found.is_empty() => writeln!(out, "No departures at {}.", time),
        Ok(found) => {
            for vehicle in found {
                writeln!(out, "{}", render(vehicle))?;
            }
            Ok(())
        }
        Err(e) => writeln!(out, "Error: {}", e),
    }
}

/// One line per record: id, times, operator, route and an optional note.
fn render(vehicle: &Vehicle) -> String {
    let arrival = vehicle
        .arrival
        .map(|t| t.to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let mut line = format!(
        "{}  {} -> {}  {}  {}",
        vehicle.id(),
        vehicle.departure,
        arrival,
        vehicle.operator,
        vehicle.route
    );
    if let Some(note) = &vehicle.note {
        line.push_str(&format!("  ({})", note));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::{TempDir, tempdir};

    fn open_store() -> (TempDir, ScheduleStore) {
        let dir = tempdir().unwrap();
        let store = ScheduleStore::open(dir.path().join("schedule.json")).unwrap();
        (dir, store)
    }

    fn drive(store: &mut ScheduleStore, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run(store, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_then_list() {
        let (_dir, mut store) = open_store();

        let out = drive(
            &mut store,
            "1\nB1\nAruzhan\nDepot - Airport\n08:30\n09:10\nexpress\n4\n0\n",
        );

        assert!(out.contains("Added."));
        assert!(out.contains("B1  08:30 -> 09:10  Aruzhan  Depot - Airport  (express)"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn blank_arrival_and_note_become_absent() {
        let (_dir, mut store) = open_store();

        drive(&mut store, "1\nB1\nAruzhan\nLoop\n08:30\n\n\n0\n");

        let v = &store.list_all()[0];
        assert!(v.arrival.is_none());
        assert!(v.note.is_none());
    }

    #[test]
    fn invalid_time_is_reported_and_recoverable() {
        let (_dir, mut store) = open_store();

        let out = drive(&mut store, "1\nB1\nAruzhan\nLoop\n8:30\n\n\n0\n");

        assert!(out.contains("Error: invalid time"));
        assert!(store.is_empty());
        // The menu came back after the error
        assert!(out.contains("Bye."));
    }

    #[test]
    fn remove_reports_missing_id() {
        let (_dir, mut store) = open_store();

        let out = drive(&mut store, "2\nB9\n0\n");
        assert!(out.contains("No vehicle with id B9."));
    }

    #[test]
    fn update_field_roundtrip() {
        let (_dir, mut store) = open_store();

        let out = drive(
            &mut store,
            "1\nB1\nAruzhan\nLoop\n08:30\n\n\n3\nB1\noperator\nDana\n0\n",
        );

        assert!(out.contains("Updated."));
        assert_eq!(store.list_all()[0].operator, "Dana");
    }

    #[test]
    fn update_rejects_unknown_field() {
        let (_dir, mut store) = open_store();

        let out = drive(
            &mut store,
            "1\nB1\nAruzhan\nLoop\n08:30\n\n\n3\nB1\nid\nB2\n0\n",
        );

        assert!(out.contains("Unknown field id"));
        assert_eq!(store.list_all()[0].id().as_str(), "B1");
    }

    #[test]
    fn find_by_time_renders_matches() {
        let (_dir, mut store) = open_store();

        let out = drive(
            &mut store,
            "1\nB1\nAruzhan\nLoop\n09:05\n\n\n5\n09:05\n5\n17:00\n0\n",
        );

        assert!(out.contains("B1  09:05 -> --:--  Aruzhan  Loop"));
        assert!(out.contains("No departures at 17:00."));
    }

    #[test]
    fn quits_on_end_of_input() {
        let (_dir, mut store) = open_store();

        let out = drive(&mut store, "");
        assert!(out.contains("Bye."));
    }

    #[test]
    fn unknown_choice_reprompts() {
        let (_dir, mut store) = open_store();

        let out = drive(&mut store, "7\n0\n");
        assert!(out.contains("Unknown choice: 7"));
    }
}
