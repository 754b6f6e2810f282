use clap::{Parser, Subcommand};
use neolung_client::SubmissionClient;
use neolung_core::{questionnaire, FieldKind, FormError, FormStateMachine};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod walkthrough;

#[derive(Parser)]
#[command(name = "neolung")]
#[command(about = "Neonatal lung development research questionnaire CLI")]
struct Cli {
    /// Base URL of the collection service
    #[arg(
        long,
        global = true,
        env = "NEOLUNG_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    server: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the questionnaire sections and fields
    Schema,
    /// Fill the questionnaire from a YAML answers file
    Fill {
        /// Mapping of field key to answer
        answers: PathBuf,
        /// Draft file to resume from and save progress to
        #[arg(long)]
        draft: Option<PathBuf>,
        /// Submit the questionnaire once every section is complete
        #[arg(long)]
        submit: bool,
    },
    /// List anonymized submissions
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neolung=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = SubmissionClient::new(cli.server);

    match cli.command {
        Some(Commands::Schema) => print_schema(),
        Some(Commands::Fill {
            answers,
            draft,
            submit,
        }) => fill(&client, answers, draft, submit).await?,
        Some(Commands::List) => {
            let listing = client
                .list()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{} submission(s)", listing.total);
            for record in listing.data {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        None => {
            println!("Use 'neolung --help' for commands");
        }
    }

    Ok(())
}

fn print_schema() {
    let schema = questionnaire();
    for (index, section) in schema.sections().iter().enumerate() {
        println!(
            "Section {} of {}: {} ({})",
            index + 1,
            schema.len(),
            section.title,
            section.description
        );
        for field in section.fields {
            let marker = if field.required { " *" } else { "" };
            println!("  {}{} - {}", field.key, marker, field.label);
            let options = field.kind.options();
            if !options.is_empty() {
                let values: Vec<_> = options.iter().map(|o| o.value).collect();
                let how = match field.kind {
                    FieldKind::MultiChoice(_) => "any of",
                    _ => "one of",
                };
                println!("      {}: {}", how, values.join(", "));
            }
        }
    }
}

async fn fill(
    client: &SubmissionClient,
    answers: PathBuf,
    draft: Option<PathBuf>,
    submit: bool,
) -> anyhow::Result<()> {
    let schema = questionnaire();
    let answers = walkthrough::load_answers(&answers)?;
    for key in walkthrough::unknown_keys(schema, &answers) {
        tracing::warn!("answers file has unknown field {}", key);
    }

    let mut form = match &draft {
        Some(path) if path.is_file() => {
            FormStateMachine::restore(schema, &walkthrough::load_draft(path)?)
        }
        _ => FormStateMachine::new(schema),
    };

    let walked = walkthrough::walk(&mut form, &answers);
    println!(
        "Section {} of {} ({:.0}%): {}",
        form.current_index() + 1,
        schema.len(),
        form.progress_fraction() * 100.0,
        form.current_section().title
    );

    if let Err(FormError::MissingFields(missing)) = &walked {
        if let Some(path) = &draft {
            walkthrough::save_draft(path, &form.draft())?;
            println!("Draft saved to {}", path.display());
        }
        anyhow::bail!("Please complete the required fields: {}", missing.keys.join(", "));
    }
    walked?;

    if !submit {
        if let Some(path) = &draft {
            walkthrough::save_draft(path, &form.draft())?;
            println!("Draft saved to {}", path.display());
        }
        println!("All sections complete; rerun with --submit to send the questionnaire.");
        return Ok(());
    }

    match client.submit_form(&mut form).await {
        Ok(id) => {
            println!("Questionnaire submitted successfully! Submission ID: {}", id);
            if let Some(path) = draft.as_deref().filter(|p| p.is_file()) {
                std::fs::remove_file(path)?;
            }
            Ok(())
        }
        Err(e) => {
            if let Some(path) = &draft {
                walkthrough::save_draft(path, &form.draft())?;
            }
            anyhow::bail!(e.user_message())
        }
    }
}
