//! Prints the paragraphs, tables, header and footer of a `.docx` package

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rusty_docx::DocxFile;
use rusty_docx::OptionalPart;

#[derive(Parser)]
#[command(name = "print_document")]
#[command(about = "Print the text content of a .docx package", long_about = None)]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print every header and footer the document references instead of only the first ones
    #[arg(long)]
    all_headers: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut package = DocxFile::open(&cli.input)
        .with_context(|| format!("Failed to open '{}'", cli.input.display()))?;
    let document = package.document()?;

    println!("Show all paragraphs");
    for (index, paragraph) in document.body.paragraphs.iter().enumerate() {
        println!("Para: {index} {paragraph}");
    }

    println!("Show all tables");
    for table in &document.body.tables {
        println!("{:?}", table.to_grid());
    }

    if cli.all_headers {
        for header in package.headers().optional()?.unwrap_or_default() {
            println!("Header: {}", header.text);
        }
        for footer in package.footers().optional()?.unwrap_or_default() {
            println!("Footer: {}", footer.text);
        }
        return Ok(());
    }

    println!("Show Header");
    match package.header().optional()? {
        Some(header) => println!("{}", header.text),
        None => println!("(no header)"),
    }

    println!("Show Footer");
    match package.footer().optional()? {
        Some(footer) => println!("{}", footer.text),
        None => println!("(no footer)"),
    }

    Ok(())
}
