//! Interactive menu over a [`Store`].
//!
//! Reads answers line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the binary can run it on stdin/stdout and
//! tests can script it.

use crate::error::Result;
use crate::store::Store;
use crate::types::{Doctor, DoctorId, DoctorUpdate, NewDoctor, Outcome};
use std::io::{BufRead, Write};

const MENU: &str = "\
\n=========== REAL-TIME DOCTOR MANAGEMENT ===========
1. Add Doctor
2. Show Doctors
3. Search Doctors
4. Update Doctor
5. Delete Doctor
6. Exit
===================================================";

/// Width of the rule drawn around tables.
const TABLE_WIDTH: usize = 95;

/// Whether the menu loop keeps going after an action.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end for the registry.
pub struct Shell<'a, R, W> {
    store: &'a mut Store,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run the menu until the user picks exit or input ends.
    ///
    /// Store errors end the loop and are returned to the caller.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.show()?,
                "3" => self.search()?,
                "4" => self.update()?,
                "5" => self.delete()?,
                "6" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice!")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Exiting system...")?;
        self.output.flush()?;
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        let mut fields = Vec::with_capacity(4);
        for label in [
            "Enter doctor name: ",
            "Enter specialization: ",
            "Enter email: ",
            "Enter contact number: ",
        ] {
            match self.prompt(label)? {
                Some(value) => fields.push(value),
                None => return Ok(Flow::Exit),
            }
        }

        if fields.iter().any(|f| f.is_empty()) {
            writeln!(self.output, "All fields are required!")?;
            return Ok(Flow::Continue);
        }

        let mut fields = fields.into_iter();
        let input = NewDoctor {
            name: fields.next().unwrap_or_default(),
            specialization: fields.next().unwrap_or_default(),
            email: fields.next().unwrap_or_default(),
            contact: fields.next().unwrap_or_default(),
        };

        let outcome = self.store.add(input)?;
        writeln!(self.output, "{}", outcome)?;
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> Result<Flow> {
        let Some(key) = self.prompt("Sort doctors by (id/name/specialization) [default id]: ")?
        else {
            return Ok(Flow::Exit);
        };

        let doctors = self.store.list(key.to_lowercase().as_str());
        if doctors.is_empty() {
            writeln!(self.output, "No doctors found.")?;
        } else {
            self.print_table("Doctor List", &doctors)?;
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(keyword) = self.prompt("Enter name or specialization to search: ")? else {
            return Ok(Flow::Exit);
        };

        let results = self.store.search(&keyword);
        if results.is_empty() {
            writeln!(self.output, "No doctors found matching your search.")?;
        } else {
            self.print_table("Search Results", &results)?;
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> Result<Flow> {
        let id = match self.prompt_id("Enter doctor ID to update: ")? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(Flow::Continue),
            IdAnswer::Eof => return Ok(Flow::Exit),
        };

        let mut values = Vec::with_capacity(3);
        for label in [
            "Enter new specialization (leave blank to keep current): ",
            "Enter new email (leave blank to keep current): ",
            "Enter new contact (leave blank to keep current): ",
        ] {
            match self.prompt(label)? {
                Some(value) => values.push(Some(value).filter(|v| !v.is_empty())),
                None => return Ok(Flow::Exit),
            }
        }

        let mut values = values.into_iter();
        let update = DoctorUpdate {
            specialization: values.next().flatten(),
            email: values.next().flatten(),
            contact: values.next().flatten(),
        };

        let outcome = match id {
            Some(id) => self.store.update(id, update)?,
            None => Outcome::NotFound,
        };
        writeln!(self.output, "{}", outcome)?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let id = match self.prompt_id("Enter doctor ID to delete: ")? {
            IdAnswer::Id(id) => id,
            IdAnswer::Invalid => return Ok(Flow::Continue),
            IdAnswer::Eof => return Ok(Flow::Exit),
        };

        let Some(confirm) =
            self.prompt("Are you sure you want to delete this doctor? (y/n): ")?
        else {
            return Ok(Flow::Exit);
        };
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(Flow::Continue);
        }

        let outcome = match id {
            Some(id) => self.store.delete(id)?,
            None => Outcome::NotFound,
        };
        writeln!(self.output, "{}", outcome)?;
        Ok(Flow::Continue)
    }

    // --- Private Helpers ---

    /// Print `text`, read one line and trim it. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_id(&mut self, text: &str) -> Result<IdAnswer> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(IdAnswer::Eof);
        };
        // Any integer is an answer; negative ones just match no doctor.
        match raw.parse::<i128>() {
            Ok(n) => Ok(IdAnswer::Id(u64::try_from(n).ok().map(DoctorId))),
            Err(_) => {
                writeln!(self.output, "Invalid ID!")?;
                Ok(IdAnswer::Invalid)
            }
        }
    }

    fn print_table(&mut self, title: &str, doctors: &[Doctor]) -> Result<()> {
        writeln!(self.output, "\n----- {} -----", title)?;
        writeln!(
            self.output,
            "{:<5} {:<20} {:<20} {:<30} {:<15}",
            "ID", "Name", "Specialization", "Email", "Contact"
        )?;
        writeln!(self.output, "{}", "-".repeat(TABLE_WIDTH))?;
        for d in doctors {
            writeln!(
                self.output,
                "{:<5} {:<20} {:<20} {:<30} {:<15}",
                d.id, d.name, d.specialization, d.email, d.contact
            )?;
        }
        writeln!(self.output, "{}", "-".repeat(TABLE_WIDTH))?;
        Ok(())
    }
}

enum IdAnswer {
    /// `None` for an integer that no doctor can have.
    Id(Option<DoctorId>),
    Invalid,
    Eof,
}
