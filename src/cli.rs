// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::drill::DrillOptions;
use crate::cmd::drill::drill;
use crate::cmd::export::export_collection;
use crate::cmd::language::LanguageAction;
use crate::cmd::language::language_command;
use crate::cmd::orphans::list_orphans;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study the words due today, plus some new ones.
    Drill {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// The language to study. Defaults to the saved preference.
        #[arg(long)]
        language: Option<String>,
        /// Maximum number of new words.
        #[arg(long = "new")]
        new_words: Option<usize>,
        /// Maximum number of review words.
        #[arg(long = "review")]
        review_words: Option<usize>,
        /// Only study words in this category.
        #[arg(long)]
        category: Option<String>,
        /// Only study words of this difficulty (1 to 5).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        difficulty: Option<u8>,
    },
    /// Print progress statistics.
    Stats {
        /// Optional path to the collection directory.
        directory: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Check the integrity of the word lists.
    Check {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Export progress as JSON.
    Export {
        /// Optional path to the collection directory.
        directory: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// List progress records for words no longer in the word lists.
    Orphans {
        /// Optional path to the collection directory.
        directory: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show or change the language preference.
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            language,
            new_words,
            review_words,
            category,
            difficulty,
        } => {
            let options = DrillOptions {
                language,
                new_words,
                review_words,
                category,
                difficulty,
            };
            drill(directory, options)
        }
        Command::Stats {
            directory,
            language,
            format,
        } => print_stats(directory, language, format),
        Command::Check { directory } => check_collection(directory),
        Command::Export {
            directory,
            language,
        } => export_collection(directory, language),
        Command::Orphans {
            directory,
            language,
        } => list_orphans(directory, language),
        Command::Language { action } => language_command(action),
    }
}
