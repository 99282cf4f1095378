#![forbid(unsafe_code)]

//! # twomass
//!
//! Animates the normal modes of a two-mass, three-spring chain in the
//! terminal.
//!
//! ## Usage
//!
//! ```bash
//! twomass                          # Animate the default chain
//! twomass --k2 2 --m2 4            # Animate a custom chain
//! twomass modes --format json      # Print the normal modes
//! twomass trace --steps 200        # Print the motion
//! ```

use anyhow::Context;
use twomass::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    twomass::run(&cli).context("twomass could not start the chain")?;

    Ok(())
}
