//! # file-isolate CLI
//!
//! Command-line interface for the file isolator.
//!
//! ## Usage
//! ```bash
//! file-isolate run ~/Downloads --chars 3
//! file-isolate run ~/Downloads --chars 2 --direction front --dry-run
//! ```

mod cli;

use file_isolator::Result;

fn main() -> Result<()> {
    cli::run()
}
