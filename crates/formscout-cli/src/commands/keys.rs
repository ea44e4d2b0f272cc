//! Keys command - list the data-key vocabulary.

use clap::Args;

use formscout_core::DataKey;

/// Arguments for the keys command.
#[derive(Args)]
pub struct KeysArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: KeysArgs) -> anyhow::Result<()> {
    if args.json {
        let keys: Vec<&str> = DataKey::ALL.iter().map(|key| key.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in DataKey::ALL {
            println!("{key}");
        }
    }
    Ok(())
}
