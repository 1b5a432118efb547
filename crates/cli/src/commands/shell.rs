//! Interactive shop and admin session.
//!
//! The shell owns one [`Bookstore`] for its whole lifetime, so the cart and
//! admin login carry over between lines. Store errors are printed and the
//! session continues; only I/O failures end it.
//!
//! # Usage
//!
//! ```bash
//! bookstore shell
//! bookstore> add 2 3
//! bookstore> checkout ann@example.com Ann Lee
//! ```

use std::io::{self, BufRead, Write};

use bookstore_core::{
    BookDraft, BookId, Bookstore, CheckoutDraft, Command, CurrencyCode, StoreError,
    ValidationError, parse_book_id, parse_quantity,
};
use secrecy::SecretString;
use thiserror::Error;

use crate::config::CliConfig;
use crate::render;

use super::CliError;

const PROMPT: &str = "bookstore> ";

/// Usage line and description for every shell command.
const COMMANDS: &[(&str, &str)] = &[
    ("books", "List all books"),
    ("search <term>", "Search titles, authors and descriptions"),
    ("add <id> [qty]", "Add a book to the cart (qty defaults to 1)"),
    ("remove <id>", "Remove a book from the cart"),
    ("cart", "Show the cart"),
    ("checkout <email> <name...>", "Buy everything in the cart"),
    ("login <user> <password>", "Log in as admin"),
    ("logout", "Log out"),
    ("new-book", "Add a book (admin)"),
    ("edit <id>", "Edit a book; blank answers keep the current value (admin)"),
    ("delete <id>", "Remove a book from the catalog (admin)"),
    ("sales", "Show the sales history (admin)"),
    ("help", "Show this list"),
    ("quit", "Leave the shell"),
];

/// A line that could not be turned into an action.
#[derive(Debug, Error)]
enum ShellError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// One parsed shell line.
#[derive(Debug)]
enum Action {
    Run(Command),
    NewBook,
    EditBook(BookId),
    Help,
    Quit,
}

/// Parse a line. Blank lines yield `None`.
fn parse_line(line: &str) -> Result<Option<Action>, ShellError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let verb = verb.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let action = match (verb.as_str(), args.as_slice()) {
        ("books", []) => Action::Run(Command::ListBooks),
        ("search", [_, ..]) => Action::Run(Command::Search {
            term: args.join(" "),
        }),
        ("add", [id]) => Action::Run(Command::AddToCart {
            book_id: parse_book_id(id)?,
            quantity: 1,
        }),
        ("add", [id, quantity]) => Action::Run(Command::AddToCart {
            book_id: parse_book_id(id)?,
            quantity: parse_quantity(quantity)?,
        }),
        ("remove", [id]) => Action::Run(Command::RemoveFromCart {
            book_id: parse_book_id(id)?,
        }),
        ("cart", []) => Action::Run(Command::ViewCart),
        ("checkout", [email, name @ ..]) if !name.is_empty() => {
            let customer = CheckoutDraft {
                name: name.join(" "),
                email: (*email).to_owned(),
            }
            .validate()?;
            Action::Run(Command::Checkout { customer })
        }
        ("login", [username, password]) => Action::Run(Command::AdminLogin {
            username: (*username).to_owned(),
            password: SecretString::from(*password),
        }),
        ("logout", []) => Action::Run(Command::AdminLogout),
        ("new-book", []) => Action::NewBook,
        ("edit", [id]) => Action::EditBook(parse_book_id(id)?),
        ("delete", [id]) => Action::Run(Command::RemoveBook {
            id: parse_book_id(id)?,
        }),
        ("sales", []) => Action::Run(Command::ViewSales),
        ("help" | "?", []) => Action::Help,
        ("quit" | "exit", []) => Action::Quit,
        (verb, _) => {
            return Err(usage_for(verb).map_or_else(
                || ShellError::Unknown(verb.to_owned()),
                ShellError::Usage,
            ));
        }
    };
    Ok(Some(action))
}

/// The usage line of a known command.
fn usage_for(verb: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(usage, _)| *usage)
        .find(|usage| usage.split(' ').next() == Some(verb))
}

/// A terminal session over any line source and sink.
pub struct Shell<R, W> {
    store: Bookstore,
    currency: CurrencyCode,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Start a session against a freshly seeded store.
    pub fn new(config: &CliConfig, input: R, output: W) -> Self {
        Self {
            store: Bookstore::new(config.admin.clone()),
            currency: config.currency,
            input,
            output,
        }
    }

    /// The store driven by this session.
    pub const fn store(&self) -> &Bookstore {
        &self.store
    }

    /// Consume the shell and return its output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and run lines until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Welcome to the bookstore. Type 'help' for a list of commands."
        )?;
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(Action::Quit)) => break,
                Ok(Some(action)) => self.perform(action)?,
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
        writeln!(self.output, "Goodbye")
    }

    fn perform(&mut self, action: Action) -> io::Result<()> {
        match action {
            Action::Run(command) => self.execute(command),
            Action::NewBook => self.new_book(),
            Action::EditBook(id) => self.edit_book(id),
            Action::Help => self.help(),
            Action::Quit => Ok(()),
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match self.store.execute(command) {
            Ok(outcome) => writeln!(self.output, "{}", render::outcome(&outcome, self.currency)),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &StoreError) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }

    fn new_book(&mut self) -> io::Result<()> {
        if !self.store.is_admin() {
            return self.report(&StoreError::Unauthorized);
        }
        let Some(draft) = self.prompt_draft(BookDraft::default())? else {
            return Ok(());
        };
        match draft.validate() {
            Ok(fields) => self.execute(Command::AddBook(fields)),
            Err(err) => self.report(&err.into()),
        }
    }

    fn edit_book(&mut self, id: BookId) -> io::Result<()> {
        if !self.store.is_admin() {
            return self.report(&StoreError::Unauthorized);
        }
        let Some(current) = self.store.catalog().find(id).map(BookDraft::from_book) else {
            return self.report(&StoreError::NotFound(id));
        };
        let Some(draft) = self.prompt_draft(current)? else {
            return Ok(());
        };
        match draft.validate() {
            Ok(fields) => self.execute(Command::UpdateBook { id, fields }),
            Err(err) => self.report(&err.into()),
        }
    }

    /// Ask for every book field, showing `current` values as defaults.
    /// `None` if input ends part way.
    fn prompt_draft(&mut self, current: BookDraft) -> io::Result<Option<BookDraft>> {
        let Some(title) = self.prompt_field("Title", &current.title)? else {
            return Ok(None);
        };
        let Some(author) = self.prompt_field("Author", &current.author)? else {
            return Ok(None);
        };
        let Some(description) = self.prompt_field("Description", &current.description)? else {
            return Ok(None);
        };
        let Some(stock) = self.prompt_field("Stock", &current.stock)? else {
            return Ok(None);
        };
        let Some(price) = self.prompt_field("Price", &current.price)? else {
            return Ok(None);
        };
        Ok(Some(BookDraft {
            title,
            author,
            description,
            stock,
            price,
        }))
    }

    fn prompt_field(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "{label}: ")?;
        } else {
            write!(self.output, "{label} [{current}]: ")?;
        }
        self.output.flush()?;
        Ok(self.read_line()?.map(|answer| {
            if answer.trim().is_empty() {
                current.to_owned()
            } else {
                answer
            }
        }))
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        for (usage, description) in COMMANDS {
            writeln!(self.output, "  {usage:<28} {description}")?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

/// Run a shell on the terminal.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn run(config: &CliConfig) -> Result<(), CliError> {
    tracing::debug!(currency = %config.currency, "Starting shell");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(config, stdin.lock(), stdout.lock());
    shell.run()?;
    tracing::debug!(sales = shell.store().sales().len(), "Shell closed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn session(script: &str) -> (Bookstore, String) {
        let mut shell = Shell::new(&CliConfig::default(), Cursor::new(script.to_owned()), Vec::new());
        shell.run().unwrap();
        let store = shell.store().clone();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (store, output)
    }

    #[test]
    fn test_parse_line() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(matches!(
            parse_line("ADD 2 3").unwrap(),
            Some(Action::Run(Command::AddToCart { quantity: 3, .. }))
        ));
        assert!(matches!(
            parse_line("add 4").unwrap(),
            Some(Action::Run(Command::AddToCart { quantity: 1, .. }))
        ));
        assert!(matches!(
            parse_line("search machine learning").unwrap(),
            Some(Action::Run(Command::Search { term })) if term == "machine learning"
        ));
        assert!(matches!(
            parse_line("checkout ann@example.com Ann Lee").unwrap(),
            Some(Action::Run(Command::Checkout { customer })) if customer.name == "Ann Lee"
        ));
        assert!(matches!(parse_line("exit").unwrap(), Some(Action::Quit)));

        assert_eq!(
            parse_line("checkout ann@example.com").unwrap_err().to_string(),
            "Usage: checkout <email> <name...>"
        );
        assert_eq!(
            parse_line("dance").unwrap_err().to_string(),
            "Unknown command 'dance'. Type 'help' for a list of commands."
        );
        assert_eq!(
            parse_line("remove two").unwrap_err().to_string(),
            "Book ID must be a whole number (got 'two')"
        );
    }

    #[test]
    fn test_purchase_session() {
        let (store, output) = session("add 2 3\ncart\ncheckout a@x.com Ann\nquit\n");

        assert!(output.contains("Added 3 x 'AI & ML' to cart"));
        assert!(output.contains("3 items in your cart"));
        assert!(output.contains("Thank you for your purchase!"));
        assert!(output.contains("Total: Rs.1200.00"));
        assert!(output.ends_with("Goodbye\n"));

        assert_eq!(store.catalog().find(BookId::new(2)).unwrap().stock, 2);
        assert_eq!(store.sales().len(), 1);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let (store, output) = session("checkout a@x.com Ann\nadd 2 9\nadd 99\nadd 1\n");

        assert!(output.contains("Error: Your cart is empty"));
        assert!(output.contains("Error: Only 5 of 'AI & ML' in stock (9 requested)"));
        assert!(output.contains("Error: Book 99 not found"));
        assert!(output.contains("Added 1 x 'Python Basics' to cart"));
        assert_eq!(store.cart().item_count(), 1);
    }

    #[test]
    fn test_admin_commands_require_login() {
        let script = "new-book\nsales\nlogin admin wrong\nlogin admin 1234\nsales\n\
                      new-book\nRust in Action\nTim McNamara\nSystems programming\n3\n45.50\n";
        let (store, output) = session(script);

        assert!(output.contains("Error: Admin login required"));
        assert!(output.contains("Error: Invalid credentials"));
        assert!(output.contains("Logged in successfully"));
        assert!(output.contains("No sales recorded yet"));
        assert!(output.contains("Book 'Rust in Action' added successfully with ID 6."));

        let book = store.catalog().find(BookId::new(6)).unwrap();
        assert_eq!(book.author, "Tim McNamara");
        assert_eq!(book.stock, 3);
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let (store, output) = session("login admin 1234\nedit 1\n\n\n\n2\n\n");

        assert!(output.contains("Title [Python Basics]: "));
        assert!(output.contains("Book updated successfully"));
        let book = store.catalog().find(BookId::new(1)).unwrap();
        assert_eq!(book.title, "Python Basics");
        assert_eq!(book.author, "John Doe");
        assert_eq!(book.stock, 2);
    }

    #[test]
    fn test_delete_drops_cart_line() {
        let (store, output) = session("add 1 2\nlogin admin 1234\ndelete 1\ncart\nlogout\ndelete 2\n");

        assert!(output.contains("Book removed successfully"));
        assert!(output.contains("Your cart is empty"));
        assert!(output.contains("Error: Admin login required"));
        assert!(store.catalog().find(BookId::new(1)).is_none());
        assert!(store.catalog().find(BookId::new(2)).is_some());
        assert!(store.cart().is_empty());
    }
}
