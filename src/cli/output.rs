//! Colored output helpers for the CLI.
//!
//! Provides consistent, colored terminal output for the mnemo CLI.

use owo_colors::OwoColorize;

/// Output style configuration.
pub struct Output {
    /// Whether to use colored output.
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the mnemo banner.
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
   {}
"#,
                " __  __ _   _ _____ __  __  ___ ".bright_cyan().bold(),
                "|  \\/  | \\ | | ____|  \\/  |/ _ \\".bright_cyan().bold(),
                "| |\\/| |  \\| |  _| | |\\/| | | | |".cyan().bold(),
                "| |  | | |\\  | |___| |  | | |_| |".blue().bold(),
                "|_|  |_|_| \\_|_____|_|  |_|\\___/".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Conversational memory engine".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 __  __ _   _ _____ __  __  ___
|  \/  | \ | | ____|  \/  |/ _ \
| |\/| |  \| |  _| | |\/| | | | |
| |  | | |\  | |___| |  | | |_| |
|_|  |_|_| \_|_____|_|  |_|\___/

   Conversational memory engine v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark.
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print the exchange separator used by the demo transcript.
    pub fn separator(&self) {
        if self.colored {
            println!("\n{}\n", "----------".dimmed());
        } else {
            println!("\n----------\n");
        }
    }

    /// Print a user turn of the demo transcript.
    pub fn user_turn(&self, text: &str) {
        if self.colored {
            println!("{}", text.bright_white().bold());
        } else {
            println!("{}", text);
        }
    }

    /// Print a model reply of the demo transcript.
    pub fn reply(&self, text: &str) {
        println!("{}", text);
    }
}
