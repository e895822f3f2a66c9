mod args;
mod logging;
mod preview;

use args::{Args, Command, print_usage};
use tracing::error;

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };
    logging::init_logging(args.verbose);

    match args.command {
        Command::Video {
            sections,
            duration,
            speed,
            resume,
        } => {
            preview::video(
                args.settings,
                args.standalone,
                sections.as_deref(),
                duration,
                speed,
                resume,
            )
            .await
        }
        Command::Quiz { questions, answers } => {
            preview::quiz(&args.settings, args.standalone, &questions, &answers)
        }
        Command::Slides => {
            preview::slides(args.standalone);
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "preview failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
