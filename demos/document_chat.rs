use dotenv::dotenv;
use financial_document_qa::*;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

fn print_summary(result: &ExtractionResult) {
    println!("📈 Extracted Financial Metrics");
    if result.metrics.is_empty() {
        println!("  (none found)");
    }
    for (name, value) in result.metrics.iter() {
        println!("  {:<12} {}", name, value);
    }

    println!("\n📄 Document Statistics");
    println!("  Characters: {}", result.stats.characters);
    println!("  Words:      {}", result.stats.words);

    if let Some(sheets) = &result.sheets {
        println!("\n📑 Sheets");
        for sheet in sheets {
            println!(
                "  {} ({} rows x {} columns)",
                sheet.name,
                sheet.row_count(),
                sheet.column_count()
            );
            for row in sheet.preview(5) {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("    {}", cells.join(" | "));
            }
        }
    }

    println!("\nPreview:\n{}...\n", result.text_preview(300));
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    dotenv().ok();

    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: document_chat <statement.pdf|statement.xlsx>")?;

    let pipeline = DocumentPipeline::new();
    let mut session = ExtractionSession::new();

    println!("📁 Processing {}...\n", path.display());
    let result = session.load(&pipeline, Document::from_path(&path)?)?;
    print_summary(result);

    let assistant = DocumentAssistant::from_env()?;
    match assistant.client().is_model_available(&assistant.config().model) {
        Ok(true) => {}
        Ok(false) => println!(
            "⚠️  Model '{}' is not pulled yet. Run `ollama pull {}`.\n",
            assistant.config().model,
            assistant.config().model
        ),
        Err(e) => println!("⚠️  {}\n", e),
    }

    println!("🤖 Ask questions about your document (type 'quit' to exit).");
    println!("Quick questions:");
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let question = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| QUICK_QUESTIONS.get(i).copied())
            .unwrap_or(input);

        println!("\nThinking...");
        match session.ask(&assistant, question) {
            Ok(turn) => {
                println!("\n{}\n", turn.answer);
                println!("------------------------------------------------------------------");
            }
            Err(e) => eprintln!("❌ Error: {}", e),
        }
    }

    println!("\n{} questions answered this session.", session.history().len());
    Ok(())
}
