use std::io::{self, Read};
use std::path::{Path, PathBuf};

use gumdrop::Options;
use log::debug;
use serde::Serialize;

use smartspell::speller::{HunspellSpeller, Speller};
use smartspell::tokenizer::Tokenize;
use smartspell::{ScoredSuggestions, SmartSpellConfig, SmartSpeller};

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[String]);
    fn write_scores(&mut self, word: &str, scores: &ScoredSuggestions);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[String]) {
        for sugg in suggestions {
            println!("{}", sugg);
        }
        println!();
    }

    fn write_scores(&mut self, _word: &str, scores: &ScoredSuggestions) {
        for (sugg, score) in scores.iter() {
            println!("{}\t\t{}", sugg, score);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<ScoredSuggestions>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }

    fn last(&mut self, word: &str) -> &mut SuggestionRequest {
        if self.results.last().map(|r| r.word != word).unwrap_or(true) {
            self.write_correction(word, false);
        }
        let i = self.results.len() - 1;
        &mut self.results[i]
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
            scores: None,
        });
    }

    fn write_suggestions(&mut self, word: &str, suggestions: &[String]) {
        self.last(word).suggestions = suggestions.to_vec();
    }

    fn write_scores(&mut self, word: &str, scores: &ScoredSuggestions) {
        self.last(word).scores = Some(scores.clone());
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "check whether words are spelled correctly")]
    Check(CheckArgs),

    #[options(help = "get suggestions for a word, ranked by a context word")]
    Suggest(SuggestArgs),

    #[options(help = "find misspelled words in running text and suggest corrections")]
    Text(TextArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "language tag of the dictionary, e.g. en-US")]
    lang: Option<String>,

    #[options(help = "Hunspell .aff file to be used")]
    dictionary: Option<PathBuf>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "language tag of the dictionary, e.g. en-US")]
    lang: Option<String>,

    #[options(help = "Hunspell .aff file to be used")]
    dictionary: Option<PathBuf>,

    #[options(help = "word2vec table to be used")]
    model: Option<PathBuf>,

    #[options(no_short, help = "read at most this many vectors")]
    limit: Option<usize>,

    #[options(help = "neighboring word used to rank the suggestions")]
    context: Option<String>,

    #[options(short = "s", help = "show closeness scores")]
    scores: bool,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(help = "maximum number of naive suggestions")]
    nbest: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TextArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "language tag of the dictionary, e.g. en-US")]
    lang: Option<String>,

    #[options(help = "Hunspell .aff file to be used")]
    dictionary: Option<PathBuf>,

    #[options(help = "word2vec table to be used")]
    model: Option<PathBuf>,

    #[options(no_short, help = "read at most this many vectors")]
    limit: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn load_config(
    path: Option<&Path>,
    lang: Option<String>,
    dictionary: Option<PathBuf>,
) -> anyhow::Result<SmartSpellConfig> {
    let mut config = match path {
        Some(path) => SmartSpellConfig::from_path(path)?,
        None => SmartSpellConfig::default(),
    };

    if let Some(lang) = lang {
        config.dictionary.tag = lang;
    }

    if dictionary.is_some() {
        config.dictionary.path = dictionary;
    }

    debug!("{:?}", config);
    Ok(config)
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn words(inputs: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    Ok(read_stdin()?
        .trim()
        .split('\n')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect())
}

fn output_writer(use_json: bool) -> Box<dyn OutputWriter> {
    if use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    }
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.lang, args.dictionary)?;
    let speller = HunspellSpeller::open(&config.dictionary)?;
    let mut writer = output_writer(args.use_json);

    for word in words(args.inputs)? {
        writer.write_correction(&word, speller.check(&word));
    }

    writer.finish()
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref(), args.lang, args.dictionary)?;

    if args.model.is_some() {
        config.model.path = args.model;
    }
    if args.limit.is_some() {
        config.model.limit = args.limit;
    }
    if let Some(v) = args.nbest {
        config.dictionary.n_best = if v == 0 { None } else { Some(v) };
    }

    let context = args.context.unwrap_or_default();
    let mut writer = output_writer(args.use_json);

    if context.is_empty() {
        // Nothing to rank against, skip loading the table.
        let speller = HunspellSpeller::open(&config.dictionary)?;

        for word in words(args.inputs)? {
            let is_correct = speller.check(&word);
            writer.write_correction(&word, is_correct);

            if args.always_suggest || !is_correct {
                writer.write_suggestions(&word, &speller.suggest(&word));
            }
        }

        return writer.finish();
    }

    let smart = SmartSpeller::open(&config)?;

    for word in words(args.inputs)? {
        let is_correct = smart.check(&word);
        writer.write_correction(&word, is_correct);

        if is_correct && !args.always_suggest {
            continue;
        }

        if args.scores {
            writer.write_scores(&word, &smart.smart_suggest_with_scores(&word, &context));
        } else if is_correct {
            writer.write_suggestions(&word, &smart.suggest(&word));
        } else {
            writer.write_suggestions(&word, &smart.smart_suggest(&word, &context));
        }
    }

    writer.finish()
}

fn text(args: TextArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref(), args.lang, args.dictionary)?;

    if args.model.is_some() {
        config.model.path = args.model;
    }
    if args.limit.is_some() {
        config.model.limit = args.limit;
    }

    let input = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    let smart = SmartSpeller::open(&config)?;
    let corrections = smart.check_text(&input);

    if args.use_json {
        println!("{}", serde_json::to_string_pretty(&corrections)?);
        return Ok(());
    }

    for correction in corrections {
        println!(
            "{:>4}: {}\t\t[{}]",
            correction.offset,
            correction.word,
            correction.context.as_deref().unwrap_or("-")
        );
        for sugg in correction.suggestions {
            println!("      {}", sugg);
        }
    }

    Ok(())
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    if args.is_words_only {
        for (index, token) in inputs.word_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    } else {
        for (index, token) in inputs.word_bound_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Check(args)) => check(args),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Text(args)) => text(args),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
