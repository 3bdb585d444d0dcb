//! AEM Prep - command line front end
//!
//! Browse the certification deck, look up exam topics, translate and read
//! text aloud from a terminal.

use aem_prep::config::Config;
use aem_prep::content::{topics, Deck, TopicTag};
use aem_prep::presentation::location::{Location, QueryLocation};
use aem_prep::presentation::render::{self, SectionToggles};
use aem_prep::presentation::Navigator;
use aem_prep::speech::{self, SpeechController, SpeechLang};
use aem_prep::translation::{MyMemoryClient, TranslationDirection, Translator};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every slide with its estimated time
    Slides,
    /// Print one slide
    Show {
        /// 1-based slide number
        #[arg(long, conflicts_with = "url")]
        slide: Option<u32>,
        /// Location carrying a `slide` query parameter
        #[arg(long)]
        url: Option<String>,
        /// Open every expandable section
        #[arg(long)]
        expand: bool,
    },
    /// List exam topics
    Topics {
        /// core, cloud or advanced
        #[arg(long)]
        tag: Option<TopicTag>,
    },
    /// Translate text between English and Spanish
    Translate {
        text: String,
        #[arg(long, default_value = "en-es")]
        direction: TranslationDirection,
    },
    /// List English and Spanish voices
    Voices,
    /// Read text aloud
    Speak {
        text: String,
        #[arg(long, default_value = "en")]
        lang: SpeechLang,
        #[arg(long)]
        rate: Option<f32>,
        #[arg(long)]
        voice: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Setup logging
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("🎓 AEM Prep v{} starting...", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Slides => list_slides(),
        Command::Show { slide, url, expand } => show_slide(slide, url, expand),
        Command::Topics { tag } => list_topics(tag),
        Command::Translate { text, direction } => translate(&config, &text, direction).await,
        Command::Voices => {
            list_voices(&config);
            Ok(())
        }
        Command::Speak {
            text,
            lang,
            rate,
            voice,
        } => speak(&config, &text, lang, rate, voice).await,
    }
}

fn list_slides() -> Result<()> {
    let deck = Deck::builtin()?;
    for slide in deck.slides() {
        println!("{:>2}. {} ({} min)", slide.id, slide.title, slide.estimated_time);
    }
    println!("Total: {} min", deck.total_duration());
    Ok(())
}

fn show_slide(slide: Option<u32>, url: Option<String>, expand: bool) -> Result<()> {
    let deck = Arc::new(Deck::builtin()?);
    let location = match (url, slide) {
        (Some(url), _) => QueryLocation::parse(&url)?,
        (None, Some(n)) => {
            let mut location = QueryLocation::default();
            location.replace_slide_param(n);
            location
        }
        (None, None) => QueryLocation::default(),
    };

    let navigator = Navigator::mount(deck, location);
    let current = navigator.current();

    let mut toggles = SectionToggles::default();
    if expand {
        toggles.expand_all(current.expandable_sections.len());
    }

    let blocks = render::render_slide(current, &toggles);
    println!(
        "[{}/{}] {:.0}% · {} min left · {}",
        navigator.current_slide(),
        navigator.total_slides(),
        navigator.progress_percent(),
        navigator.estimated_time_remaining(),
        navigator.location().as_str()
    );
    println!();
    print!("{}", render::to_plain_text(&blocks));
    Ok(())
}

fn list_topics(tag: Option<TopicTag>) -> Result<()> {
    let all = topics::builtin()?;
    let tags: Vec<TopicTag> = match tag {
        Some(tag) => vec![tag],
        None => TopicTag::ALL.to_vec(),
    };

    for tag in tags {
        println!("== {} ==", tag.heading());
        for topic in topics::by_tag(&all, tag) {
            println!("{} {}: {}", topic.icon, topic.title, topic.description);
            for detail in &topic.details {
                println!("    - {}", detail);
            }
        }
        println!();
    }
    Ok(())
}

async fn translate(config: &Config, text: &str, direction: TranslationDirection) -> Result<()> {
    let backend = MyMemoryClient::from_config(config);
    let mut translator = Translator::new(text);
    translator.set_translation_direction(direction);

    translator.translate_text(&backend).await;
    if translator.translated_text().is_empty() {
        info!("Nothing to translate");
    } else {
        println!("{}", translator.translated_text());
    }
    Ok(())
}

fn build_controller(config: &Config) -> SpeechController {
    let engine = speech::create_engine(config);
    let mut controller = SpeechController::new(engine);
    controller.set_speech_rate(config.speech_rate);
    if !config.preferred_voice.is_empty() {
        controller.set_selected_voice(&config.preferred_voice);
    }
    controller
}

fn list_voices(config: &Config) {
    let controller = build_controller(config);
    if controller.voices().is_empty() {
        println!("No English or Spanish voices found ({})", controller.engine_name());
    }
    for voice in controller.voices() {
        let marker = if voice.name == controller.selected_voice() {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, voice);
    }
}

async fn speak(
    config: &Config,
    text: &str,
    lang: SpeechLang,
    rate: Option<f32>,
    voice: Option<String>,
) -> Result<()> {
    let mut controller = build_controller(config);
    if let Some(rate) = rate {
        controller.set_speech_rate(rate);
    }
    if let Some(voice) = voice {
        controller.set_selected_voice(&voice);
    }

    controller.speak(text, lang);
    if !controller.is_speaking() {
        anyhow::bail!("speech engine '{}' refused to start", controller.engine_name());
    }

    while controller.is_speaking() {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.drain_events();
    }
    Ok(())
}
