use clap::{CommandFactory, Parser, Subcommand};
use cli::handlers::{EvalArgs, handle_eval};
use console::Style;

#[derive(Parser)]
#[command(version, about = "Top-1/top-5 accuracy of an image classifier")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate recorded network outputs against a validation set
    Eval(EvalArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Eval(args)) => {
            if let Err(error) = handle_eval(args) {
                let style_error = Style::new().red().bold();
                eprintln!("{} {error}", style_error.apply_to("error:"));
                std::process::exit(1);
            }
        },
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().unwrap();
        },
    }
}
