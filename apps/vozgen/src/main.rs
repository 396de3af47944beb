mod commands;
mod input;

use clap::{Parser, Subcommand};
use speech_service::{Accent, Style};
use std::path::PathBuf;
use vozgen_core::DEFAULT_SAMPLE_RATE;

use commands::GenerateArgs;
use input::VoiceChoices;

#[derive(Parser, Debug)]
#[command(author, version, about = "Spanish text-to-speech clips as WAV files")]
struct Cli {
    /// Config file (default: configs/vozgen.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate speech for one or more texts and save each clip as a WAV file.
    Generate {
        /// Text to speak; repeat for several clips. May contain tags such as [pausa].
        #[arg(long = "text")]
        texts: Vec<String>,

        /// Read a text from a .txt file; repeat for several clips.
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Voice id from `vozgen voices` (e.g. f1, m2).
        #[arg(long)]
        voice: Option<String>,

        #[arg(long)]
        accent: Option<Accent>,

        #[arg(long)]
        style: Option<Style>,

        /// 0.5 to 2.0, 1.0 is natural.
        #[arg(long)]
        speed: Option<f32>,

        /// Speed as a slider step, -10 (0.5) to 10 (2.0).
        #[arg(
            long,
            allow_negative_numbers = true,
            conflicts_with = "speed",
            value_parser = clap::value_parser!(i8).range(-10..=10)
        )]
        speed_step: Option<i8>,

        /// -10 to 10, 0 is natural.
        #[arg(long, allow_negative_numbers = true)]
        pitch: Option<i8>,

        /// Append a tag (pausa, risa, grito, llanto) to every text; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Output file for a single text (default: voice-gen-{id}.wav in the
        /// configured output dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Wrap a file of base-64 PCM16 samples in a WAV container.
    Encode {
        #[arg(long)]
        payload: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        #[arg(long)]
        out: PathBuf,
    },

    /// Print the header of a WAV file.
    Inspect { file: PathBuf },

    /// List voices, accents, styles and tags.
    Voices,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            texts,
            files,
            voice,
            accent,
            style,
            speed,
            speed_step,
            pitch,
            tags,
            out,
        } => {
            let settings = vozgen_config::load_settings(cli.config.as_deref())?;
            let args = GenerateArgs {
                texts,
                files,
                choices: VoiceChoices {
                    voice,
                    accent,
                    style,
                    speed,
                    speed_step,
                    pitch,
                    tags,
                },
                out,
            };
            commands::generate(&settings, args).await
        }
        Command::Encode {
            payload,
            sample_rate,
            out,
        } => commands::encode(&payload, sample_rate, &out),
        Command::Inspect { file } => commands::inspect(&file),
        Command::Voices => {
            commands::voices();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "vozgen", "generate", "--text", "hola", "--accent", "méxico", "--style", "alegre",
            "--pitch", "-4", "--speed", "1.2",
        ])
        .unwrap();
        match cli.command {
            Command::Generate {
                accent,
                style,
                pitch,
                speed,
                ..
            } => {
                assert_eq!(accent, Some(Accent::Mexico));
                assert_eq!(style, Some(Style::Joyful));
                assert_eq!(pitch, Some(-4));
                assert_eq!(speed, Some(1.2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_batch_with_tags() {
        let cli = Cli::try_parse_from([
            "vozgen", "generate", "--text", "uno", "--text", "dos", "--file", "tres.txt",
            "--tag", "risa", "--tag", "pausa", "--speed-step", "-5",
        ])
        .unwrap();
        match cli.command {
            Command::Generate {
                texts,
                files,
                tags,
                speed_step,
                ..
            } => {
                assert_eq!(texts, ["uno", "dos"]);
                assert_eq!(files, [PathBuf::from("tres.txt")]);
                assert_eq!(tags, ["risa", "pausa"]);
                assert_eq!(speed_step, Some(-5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_speed_step_bounds() {
        assert!(Cli::try_parse_from(["vozgen", "generate", "--text", "a", "--speed-step", "11"])
            .is_err());
        assert!(Cli::try_parse_from([
            "vozgen", "generate", "--text", "a", "--speed", "1.0", "--speed-step", "2",
        ])
        .is_err());
    }

    #[test]
    fn test_encode_default_rate() {
        let cli =
            Cli::try_parse_from(["vozgen", "encode", "--payload", "p.b64", "--out", "o.wav"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Encode {
                sample_rate: 24000,
                ..
            }
        ));
    }
}
