pub mod cli;
pub mod project;
pub mod store;

/// Run the command line interface.
pub fn run_cli() -> anyhow::Result<()> {
    cli::run()
}
