use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use docx_imgindex::{AmbiguityPolicy, IndexOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Ambiguity {
    First,
    Last,
    Reject,
}

impl From<Ambiguity> for AmbiguityPolicy {
    fn from(a: Ambiguity) -> Self {
        match a {
            Ambiguity::First => AmbiguityPolicy::First,
            Ambiguity::Last => AmbiguityPolicy::Last,
            Ambiguity::Reject => AmbiguityPolicy::Reject,
        }
    }
}

/// Locate embedded images in a DOCX file by paragraph and run
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input DOCX file
    input: PathBuf,

    /// Print the index as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Copy resolved images into this directory
    #[arg(long, value_name = "DIR")]
    extract: Option<PathBuf>,

    /// Substring identifying the main document stream
    #[arg(long, default_value = "document.xml")]
    marker: String,

    /// How to choose between several matching streams
    #[arg(long, value_enum, default_value_t = Ambiguity::First)]
    ambiguity: Ambiguity,
}

fn run(args: &Args) -> Result<(), docx_imgindex::Error> {
    let options = IndexOptions {
        document_marker: args.marker.clone(),
        ambiguity: args.ambiguity.into(),
        ..IndexOptions::default()
    };
    let index = docx_imgindex::index_docx_with(&args.input, &options)?;

    if args.json {
        println!("{}", docx_imgindex::report::to_json(&index)?);
    } else {
        print!("{}", docx_imgindex::report::Summary(&index));
    }

    if let Some(dir) = &args.extract {
        let images = docx_imgindex::extract_images_from_path(&args.input, &index, dir)?;
        eprintln!("Extracted {} image(s) to {}", images.len(), dir.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
