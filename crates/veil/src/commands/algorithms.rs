//! Algorithms command.

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the algorithms command.
#[derive(Args, Debug)]
pub struct AlgorithmsArgs {
    /// Print as a JSON object (for scripting)
    #[arg(long)]
    pub json: bool,
}

/// Print the names accepted when opening a session.
pub fn run(args: AlgorithmsArgs, ctx: &Context) -> Result<()> {
    let names = veil_cipher::supported_algorithms();

    if args.json {
        println!("{}", serde_json::json!({ "names": names }));
        return Ok(());
    }

    for name in names {
        if ctx.verbose {
            let algorithm: veil_cipher::Algorithm = name.parse()?;
            println!(
                "{:<8} key {} bytes, block {} bytes",
                name,
                algorithm.key_len(),
                algorithm.block_size()
            );
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
