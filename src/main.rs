mod config;
mod matcher;
mod model;
mod sources;
mod state;

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

use crate::config::{Book, Config, load_config, project_dirs};
use crate::model::{Entry, EntryOrigin};
use crate::sources::cards::CardsSource;
use crate::sources::contacts::ContactsSource;
use crate::sources::{Source, recents};
use crate::state::PickerState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company-name query; omit to get an interactive prompt
    query: Option<String>,

    /// Address book to search
    #[arg(short, long, default_value = "default")]
    book: String,

    /// Maximum number of results to show
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;

    // Validate book exists, fallback to default if not
    let book_name = if config.books.contains_key(&args.book) {
        args.book.clone()
    } else {
        "default".to_string()
    };
    let book = config.books.get(&book_name).cloned().unwrap_or_default();

    let limit = args.limit.unwrap_or(config.general.result_limit);

    let entries = scan_sources(&config, &book);

    let mut state = PickerState::new(config);
    state.active_book = book_name;
    state.set_entries(entries);

    match &args.query {
        Some(query) => {
            state.update_query(query);
            print_results(&state, limit);
        }
        None => run_prompt(&mut state, limit)?,
    }

    Ok(())
}

fn scan_sources(config: &Config, book: &Book) -> Vec<Entry> {
    let mut entries = Vec::new();

    // Static entries declared in the book itself
    for item in &book.items {
        let mut entry = Entry::new(
            format!("static:{}", item.company),
            item.company.clone(),
            EntryOrigin::Static,
        );
        entry.contact = item.contact.clone();
        entries.push(entry);
    }

    let data_dir = project_dirs().map(|dirs| dirs.data_dir().to_path_buf());

    // Only scan if the source is in the book's source list
    if book.sources.contains(&"contacts".to_string()) {
        let path = config
            .sources
            .contacts_file
            .clone()
            .or_else(|| data_dir.as_ref().map(|d| d.join("contacts.json")));
        if let Some(path) = path {
            if let Ok(mut e) = ContactsSource::new(path).scan() {
                entries.append(&mut e);
            }
        }
    }
    if book.sources.contains(&"cards".to_string()) {
        let dir = config
            .sources
            .cards_dir
            .clone()
            .or_else(|| data_dir.as_ref().map(|d| d.join("cards")));
        if let Some(dir) = dir {
            if let Ok(mut e) = CardsSource::new(dir).scan() {
                entries.append(&mut e);
            }
        }
    }

    entries
}

fn print_results(state: &PickerState, limit: usize) {
    let mut shown = 0;
    for (i, entry) in state.results().take(limit).enumerate() {
        let mut line = format!("{}. {}", i + 1, entry.company);
        if let Some(contact) = &entry.contact {
            line.push_str(&format!(" — {}", contact));
        }
        if entry.contact_count > 1 {
            line.push_str(&format!(" ({} contacts)", entry.contact_count));
        }
        println!("{}", line);
        shown += 1;
    }
    if shown == 0 {
        println!("(no matching companies)");
    }
}

fn run_prompt(state: &mut PickerState, limit: usize) -> Result<()> {
    println!("Type to search, :pick N to select, :quit to exit.");
    print_results(state, limit);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == ":quit" || line == ":q" {
            break;
        }

        if let Some(rest) = line.strip_prefix(":pick") {
            match rest.trim().parse::<usize>() {
                Ok(n) => {
                    let picked = state.pick(n).map(|e| (e.company.clone(), e.contact.clone()));
                    match picked {
                        Some((company, contact)) => {
                            println!("Picked: {}", company);
                            if let Some(contact) = contact {
                                println!("Contact: {}", contact);
                            }
                            if let Err(err) = recents::save_recents(&state.recents) {
                                log::warn!("Failed to save recents: {}", err);
                            }
                        }
                        None => println!("No result #{}", n),
                    }
                }
                Err(_) => println!("Usage: :pick N"),
            }
            continue;
        }

        state.update_query(line);
        print_results(state, limit);
    }

    Ok(())
}
