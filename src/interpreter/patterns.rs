//! Deterministic phrase rules. Used when no model is configured or the model
//! fails; the rule table is plain data and can be replaced or extended.

use std::path::{Component, Path};

use log::debug;

use super::{InterpretError, InterpretationRequest, InterpretationStrategy};
use crate::core::commands::ParsedCommand;

const CREATE: &[&str] = &["create", "make", "new", "add"];
const FOLDER: &[&str] = &["folder", "directory", "dir"];
const FILE: &[&str] = &["file"];
const MARKERS: &[&str] = &["called", "named"];
const DESTINATIONS: &[&str] = &["into", "to", "in", "inside", "as"];
const REFERENTS: &[&str] = &["it", "there", "that", "this"];
const HERE: &[&str] = &["current", "here", "this", "it"];

/// Start a new clause, so never continue an operand list.
const VERBS: &[&str] = &[
    "create", "make", "move", "put", "copy", "duplicate", "rename", "delete", "remove", "erase",
    "go", "list", "show", "open", "read",
];

/// Skipped while looking for an operand.
const FILLERS: &[&str] = &[
    "the", "a", "an", "my", "file", "files", "folder", "directory", "dir", "new", "empty",
    "called", "named",
];

/// End the search for an operand.
const STOPS: &[&str] = &[
    "and", "then", "to", "into", "in", "inside", "as", "from", "with", "it", "there", "please",
    "for", "of",
];

type RuleOutcome = Result<Option<Vec<ParsedCommand>>, InterpretError>;

/// A sequence of lowercase words matched against consecutive tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase(Vec<String>);

impl Phrase {
    pub fn new(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_lowercase).collect())
    }
}

pub struct PatternRule {
    name: String,
    triggers: Vec<Vec<Phrase>>,
    build: Box<dyn Fn(&Utterance) -> RuleOutcome>,
}

impl PatternRule {
    /// A rule without trigger groups matches every request.
    pub fn new(name: &str, build: impl Fn(&Utterance) -> RuleOutcome + 'static) -> Self {
        Self {
            name: name.to_string(),
            triggers: Vec::new(),
            build: Box::new(build),
        }
    }

    /// Always emits `command` without arguments.
    pub fn fixed(name: &str, command: &'static str) -> Self {
        Self::new(name, move |_| Ok(Some(vec![bare(command)])))
    }

    /// Adds a trigger group: at least one of `phrases` must be present.
    pub fn when_any(mut self, phrases: &[&str]) -> Self {
        self.triggers
            .push(phrases.iter().map(|p| Phrase::new(p)).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, utterance: &Utterance) -> bool {
        self.triggers
            .iter()
            .all(|group| group.iter().any(|phrase| utterance.contains(phrase)))
    }
}

pub struct PatternStrategy {
    rules: Vec<PatternRule>,
}

impl PatternStrategy {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(PatternRule::name)
    }
}

impl Default for PatternStrategy {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl InterpretationStrategy for PatternStrategy {
    fn name(&self) -> &str {
        "patterns"
    }

    fn try_interpret(
        &self,
        request: &InterpretationRequest<'_>,
    ) -> Result<Vec<ParsedCommand>, InterpretError> {
        let utterance = Utterance::new(request.text);
        for rule in &self.rules {
            if !rule.matches(&utterance) {
                continue;
            }
            match (rule.build)(&utterance)? {
                Some(commands) if !commands.is_empty() => {
                    debug!("rule '{}' matched", rule.name);
                    return Ok(commands);
                }
                _ => debug!("rule '{}' triggered but found no operands", rule.name),
            }
        }
        Ok(Vec::new())
    }
}

pub fn default_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new("create folder then move", create_then_move)
            .when_any(CREATE)
            .when_any(FOLDER)
            .when_any(&["move", "put"]),
        PatternRule::new("create folder", create_folder)
            .when_any(CREATE)
            .when_any(FOLDER),
        PatternRule::new("create file", create_file)
            .when_any(CREATE)
            .when_any(FILE),
        PatternRule::new("copy", |u| transfer(u, "cp", &["copy", "duplicate"]))
            .when_any(&["copy", "duplicate"]),
        PatternRule::new("move", |u| transfer(u, "mv", &["move", "rename", "put"]))
            .when_any(&["move", "rename", "put"]),
        PatternRule::new("delete", delete).when_any(&["delete", "remove", "erase"]),
        PatternRule::new("change directory", change_directory).when_any(&[
            "go to",
            "go into",
            "go up",
            "go back",
            "go home",
            "change directory",
            "change to",
            "cd into",
            "cd to",
            "navigate to",
            "switch to",
            "enter",
            "parent directory",
            "parent folder",
            "home directory",
        ]),
        PatternRule::new("show file", show_file).when_any(&[
            "read",
            "contents of",
            "content of",
            "what's in",
            "what is in",
            "show file",
            "display file",
            "open file",
            "print file",
        ]),
        PatternRule::new("current directory", current_directory).when_any(&[
            "where am i",
            "current directory",
            "current folder",
            "working directory",
            "which directory",
            "current path",
        ]),
        PatternRule::fixed("cpu", "cpu").when_any(&["cpu", "processor"]),
        PatternRule::fixed("memory", "mem").when_any(&["memory", "ram"]),
        PatternRule::fixed("processes", "ps").when_any(&[
            "process",
            "processes",
            "running programs",
            "tasks",
        ]),
        PatternRule::fixed("disk", "disk").when_any(&[
            "disk",
            "disks",
            "storage",
            "free space",
        ]),
        PatternRule::new("list files", list_files).when_any(&[
            "list",
            "ls",
            "files",
            "contents",
            "what's here",
            "what is here",
            "what's in",
            "what is in",
        ]),
        PatternRule::fixed("history", "history").when_any(&[
            "history",
            "previous commands",
            "past commands",
        ]),
        PatternRule::fixed("clear", "clear").when_any(&[
            "clear screen",
            "clear the screen",
            "clean the screen",
            "clear terminal",
            "clear the terminal",
        ]),
        PatternRule::fixed("help", "help").when_any(&["help", "what can you do", "commands"]),
    ]
}

fn bare(name: &str) -> ParsedCommand {
    ParsedCommand::new(name, Vec::<String>::new())
}

/// Trims quotes and trailing punctuation and refuses names that are empty,
/// absolute, or climb out through `..`.
pub fn sanitize(raw: &str) -> Result<String, InterpretError> {
    let name = raw
        .trim()
        .trim_end_matches([',', ';', ':', '!', '?'])
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    let escapes = Path::new(name).components().any(|c| {
        matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if name.is_empty() || escapes {
        return Err(InterpretError::UnsafeArgument(raw.to_string()));
    }
    Ok(name.to_string())
}

fn create_then_move(u: &Utterance) -> RuleOutcome {
    let Some(folder) = u.name_near(FOLDER) else {
        return Ok(None);
    };
    let folder = sanitize(&folder)?;

    let Some(verb) = u.position(&["move", "put"]) else {
        return Ok(None);
    };
    let sources = u.operands_at(verb + 1);
    if sources.is_empty() {
        return Ok(None);
    }

    let dest = match u.destination_after(verb + 1) {
        Some(Destination::Named(name)) => sanitize(&name)?,
        Some(Destination::Referent) | None => folder.clone(),
    };

    let mut commands = vec![ParsedCommand::new("mkdir", [folder])];
    for source in sources {
        commands.push(ParsedCommand::new("mv", [sanitize(&source)?, dest.clone()]));
    }
    Ok(Some(commands))
}

fn create_folder(u: &Utterance) -> RuleOutcome {
    match u.name_near(FOLDER) {
        Some(name) => Ok(Some(vec![ParsedCommand::new("mkdir", [sanitize(&name)?])])),
        None => Ok(None),
    }
}

fn create_file(u: &Utterance) -> RuleOutcome {
    match u.name_near(FILE) {
        Some(name) => Ok(Some(vec![ParsedCommand::new("touch", [sanitize(&name)?])])),
        None => Ok(None),
    }
}

fn transfer(u: &Utterance, command: &str, verbs: &[&str]) -> RuleOutcome {
    let Some(verb) = u.position(verbs) else {
        return Ok(None);
    };
    let sources = u.operands_at(verb + 1);
    // several files cannot all be renamed to one name
    if sources.is_empty() || (sources.len() > 1 && u.word(verb) == Some("rename")) {
        return Ok(None);
    }
    // "it" has no referent outside a compound request.
    let Some(Destination::Named(dest)) = u.destination_after(verb + 1) else {
        return Ok(None);
    };
    let dest = sanitize(&dest)?;

    sources
        .iter()
        .map(|source| Ok(ParsedCommand::new(command, [sanitize(source)?, dest.clone()])))
        .collect::<Result<Vec<_>, InterpretError>>()
        .map(Some)
}

fn delete(u: &Utterance) -> RuleOutcome {
    let Some(verb) = u.position(&["delete", "remove", "erase"]) else {
        return Ok(None);
    };
    let start = u.position(MARKERS).map_or(verb + 1, |marker| marker + 1);
    let targets = u
        .operands_at(start)
        .into_iter()
        .map(|target| sanitize(&target))
        .collect::<Result<Vec<_>, _>>()?;
    if targets.is_empty() {
        return Ok(None);
    }

    let wildcard = targets.iter().any(|t| t.contains(['*', '?']));
    let command = if u.position(FOLDER).is_some() && !wildcard {
        "rmdir"
    } else {
        "rm"
    };
    Ok(Some(vec![ParsedCommand::new(command, targets)]))
}

fn change_directory(u: &Utterance) -> RuleOutcome {
    if u.contains_any(&["go up", "go back", "parent directory", "parent folder"]) {
        return Ok(Some(vec![ParsedCommand::new("cd", [".."])]));
    }
    if u.contains_any(&["go home", "home directory"]) {
        return Ok(Some(vec![bare("cd")]));
    }

    let target = u.named().or_else(|| {
        u.position(&["to", "into", "enter", "folder", "directory"])
            .and_then(|p| u.operand_at(p + 1))
    });
    match target {
        Some(target) => Ok(Some(vec![ParsedCommand::new("cd", [sanitize(&target)?])])),
        None => Ok(None),
    }
}

fn show_file(u: &Utterance) -> RuleOutcome {
    let target = u.named().or_else(|| {
        u.position(&["of", "in", "read", "file", "open", "print"])
            .and_then(|p| u.operand_at(p + 1))
    });
    match target {
        Some(target) if !HERE.contains(&target.to_lowercase().as_str()) => {
            Ok(Some(vec![ParsedCommand::new("cat", [sanitize(&target)?])]))
        }
        _ => Ok(None),
    }
}

fn current_directory(u: &Utterance) -> RuleOutcome {
    if u.contains_any(&["list", "files", "contents", "what's in", "what is in"]) {
        return Ok(None);
    }
    Ok(Some(vec![bare("pwd")]))
}

fn list_files(u: &Utterance) -> RuleOutcome {
    let mut args = Vec::new();
    if u.contains_any(&["hidden", "all files", "everything"]) {
        args.push("-a".to_string());
    }

    let path = u
        .position(&["in", "inside", "of"])
        .and_then(|p| u.operand_at(p + 1))
        .filter(|p| !HERE.contains(&p.to_lowercase().as_str()));
    if let Some(path) = path {
        args.push(sanitize(&path)?);
    }
    Ok(Some(vec![ParsedCommand::new("ls", args)]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Named(String),
    Referent,
}

#[derive(Debug, Clone)]
struct Token {
    raw: String,
    lower: String,
    quoted: bool,
    /// Written with a trailing comma, as in "a.txt, b.txt".
    listed: bool,
}

impl Token {
    fn plain(word: &str) -> Self {
        let mut raw = word
            .trim_matches(|c| c == '"' || c == '\'')
            .trim_end_matches([',', ';', ':', '!', '?']);
        // sentence-ending period, but "." and ".." are paths
        if raw.len() > 1 && raw.ends_with('.') && !raw.ends_with("..") {
            raw = &raw[..raw.len() - 1];
        }
        let mut token = Self::build(raw, false);
        token.listed = word.ends_with(',');
        token
    }

    fn quoted(text: &str) -> Self {
        Self::build(text, true)
    }

    fn build(raw: &str, quoted: bool) -> Self {
        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
            quoted,
            listed: false,
        }
    }
}

/// A request split into words. Double-quoted spans stay one token and are
/// never treated as keywords.
pub struct Utterance {
    tokens: Vec<Token>,
}

impl Utterance {
    pub fn new(text: &str) -> Self {
        let mut tokens = Vec::new();
        let mut open: Option<String> = None;

        for word in text.split_whitespace() {
            if let Some(buffer) = open.as_mut() {
                buffer.push(' ');
                buffer.push_str(word);
                if word.ends_with('"') {
                    tokens.push(Token::quoted(buffer.trim_matches('"')));
                    open = None;
                }
                continue;
            }

            let closed_here = word.len() > 1 && word.ends_with('"');
            if word.starts_with('"') && closed_here {
                tokens.push(Token::quoted(word.trim_matches('"')));
            } else if word.starts_with('"') {
                open = Some(word.to_string());
            } else {
                tokens.push(Token::plain(word));
            }
        }
        if let Some(buffer) = open {
            tokens.push(Token::quoted(buffer.trim_matches('"')));
        }

        Self { tokens }
    }

    pub fn contains(&self, phrase: &Phrase) -> bool {
        let words = &phrase.0;
        if words.is_empty() || words.len() > self.tokens.len() {
            return false;
        }
        self.tokens.windows(words.len()).any(|window| {
            window
                .iter()
                .zip(words)
                .all(|(token, word)| !token.quoted && token.lower == *word)
        })
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains(&Phrase::new(p)))
    }

    /// Index of the first unquoted token equal to one of `words`.
    pub fn position(&self, words: &[&str]) -> Option<usize> {
        self.position_from(0, words)
    }

    pub fn position_from(&self, start: usize, words: &[&str]) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, t)| !t.quoted && words.contains(&t.lower.as_str()))
            .map(|(i, _)| i)
    }

    /// Lowercase form of the token at `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|t| t.lower.as_str())
    }

    /// The first name-like token at or after `index`, skipping articles and
    /// nouns. "all .py files" yields `*.py`.
    pub fn operand_at(&self, index: usize) -> Option<String> {
        self.operand_span(index).map(|(operand, _)| operand)
    }

    /// Every operand from `index` on, joined by "and" or commas:
    /// "a.txt, b.txt and c.txt".
    pub fn operands_at(&self, index: usize) -> Vec<String> {
        let mut operands = Vec::new();
        let mut next = index;
        while let Some((operand, end)) = self.operand_span(next) {
            operands.push(operand);
            let listed = end
                .checked_sub(1)
                .and_then(|last| self.tokens.get(last))
                .is_some_and(|t| t.listed);
            next = match self.tokens.get(end) {
                Some(t) if !t.quoted && t.lower == "and" => end + 1,
                Some(_) if listed => end,
                _ => break,
            };
            let starts_clause = self
                .tokens
                .get(next)
                .is_some_and(|t| !t.quoted && VERBS.contains(&t.lower.as_str()));
            if starts_clause {
                break;
            }
        }
        operands
    }

    /// An operand and the index just past the tokens it used.
    fn operand_span(&self, index: usize) -> Option<(String, usize)> {
        for (i, token) in self.tokens.iter().enumerate().skip(index) {
            if token.quoted {
                return Some((token.raw.clone(), i + 1));
            }
            let word = token.lower.as_str();
            if matches!(word, "all" | "every" | "everything") {
                return Some(self.glob_at(i + 1));
            }
            if FILLERS.contains(&word) {
                continue;
            }
            if STOPS.contains(&word) {
                return None;
            }
            return Some((token.raw.clone(), i + 1));
        }
        None
    }

    /// Name given after "called"/"named".
    pub fn named(&self) -> Option<String> {
        self.position(MARKERS).and_then(|p| self.operand_at(p + 1))
    }

    /// Name attached to one of `nouns`: "called X", "folder X" or "X folder".
    pub fn name_near(&self, nouns: &[&str]) -> Option<String> {
        if let Some(name) = self.named() {
            return Some(name);
        }
        let noun = self.position(nouns)?;
        self.operand_at(noun + 1).or_else(|| {
            let before = self.tokens.get(noun.checked_sub(1)?)?;
            let word = before.lower.as_str();
            let keyword =
                FILLERS.contains(&word) || STOPS.contains(&word) || CREATE.contains(&word);
            (before.quoted || !keyword).then(|| before.raw.clone())
        })
    }

    fn destination_after(&self, start: usize) -> Option<Destination> {
        let prep = self.position_from(start, DESTINATIONS)?;
        for token in self.tokens.iter().skip(prep + 1) {
            let word = token.lower.as_str();
            if !token.quoted && REFERENTS.contains(&word) {
                return Some(Destination::Referent);
            }
            if !token.quoted && FILLERS.contains(&word) {
                continue;
            }
            break;
        }
        self.operand_at(prep + 1).map(Destination::Named)
    }

    /// Pattern for "all ..." starting at `index`, and the index past it.
    fn glob_at(&self, index: usize) -> (String, usize) {
        let mut rest = self
            .tokens
            .iter()
            .enumerate()
            .skip(index)
            .filter(|(_, t)| !matches!(t.lower.as_str(), "the" | "of"));

        let Some((first_at, first)) = rest.next() else {
            return ("*".to_string(), self.tokens.len());
        };
        let files_at = rest
            .next()
            .filter(|(_, t)| matches!(t.lower.as_str(), "files" | "file"))
            .map(|(i, _)| i);
        let end = files_at.map_or(first_at + 1, |i| i + 1);

        let word = first.lower.as_str();
        if word.starts_with("*.") {
            return (first.raw.clone(), end);
        }
        if word.len() > 1 && word.starts_with('.') {
            return (format!("*{}", first.raw), end);
        }
        if files_at.is_some() && word.chars().all(|c| c.is_ascii_alphanumeric()) {
            return (format!("*.{}", extension_for(word)), end);
        }
        // "all files", "everything": the next word is not part of the pattern
        let end = if matches!(word, "files" | "file") {
            first_at + 1
        } else {
            first_at
        };
        ("*".to_string(), end)
    }
}

fn extension_for(word: &str) -> &str {
    match word {
        "python" => "py",
        "text" => "txt",
        "rust" => "rs",
        "markdown" => "md",
        "javascript" => "js",
        "typescript" => "ts",
        "shell" => "sh",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> Vec<ParsedCommand> {
        let request = InterpretationRequest {
            text,
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        PatternStrategy::default().try_interpret(&request).unwrap()
    }

    fn cmd<const N: usize>(name: &str, args: [&str; N]) -> ParsedCommand {
        ParsedCommand::new(name, args)
    }

    #[test]
    fn test_create_then_move_into_it() {
        assert_eq!(
            interpret("create a folder called backup and move demo.txt into it"),
            vec![cmd("mkdir", ["backup"]), cmd("mv", ["demo.txt", "backup"])]
        );
    }

    #[test]
    fn test_create_then_move_glob() {
        assert_eq!(
            interpret("make a folder named scripts and move all .py files there"),
            vec![cmd("mkdir", ["scripts"]), cmd("mv", ["*.py", "scripts"])]
        );
        assert_eq!(
            interpret("create a logs folder and put all log files in it"),
            vec![cmd("mkdir", ["logs"]), cmd("mv", ["*.log", "logs"])]
        );
    }

    #[test]
    fn test_create_then_move_several_sources() {
        assert_eq!(
            interpret("create folder backup and move demo.txt and notes.txt into it"),
            vec![
                cmd("mkdir", ["backup"]),
                cmd("mv", ["demo.txt", "backup"]),
                cmd("mv", ["notes.txt", "backup"]),
            ]
        );
        assert_eq!(
            interpret("make a folder called docs and move a.md, b.md and all .txt files into it"),
            vec![
                cmd("mkdir", ["docs"]),
                cmd("mv", ["a.md", "docs"]),
                cmd("mv", ["b.md", "docs"]),
                cmd("mv", ["*.txt", "docs"]),
            ]
        );
    }

    #[test]
    fn test_transfer_several_sources() {
        assert_eq!(
            interpret("copy a.txt and b.txt to archive"),
            vec![cmd("cp", ["a.txt", "archive"]), cmd("cp", ["b.txt", "archive"])]
        );
        assert!(interpret("rename a.txt and b.txt to c.txt").is_empty());
        assert_eq!(
            interpret("delete a.txt, b.txt and c.txt"),
            vec![cmd("rm", ["a.txt", "b.txt", "c.txt"])]
        );
    }

    #[test]
    fn test_create_single() {
        assert_eq!(interpret("create folder backup"), vec![cmd("mkdir", ["backup"])]);
        assert_eq!(
            interpret("make a new file called notes.txt."),
            vec![cmd("touch", ["notes.txt"])]
        );
        assert_eq!(
            interpret("create a folder called \"my projects\""),
            vec![cmd("mkdir", ["my projects"])]
        );
    }

    #[test]
    fn test_create_without_name_finds_nothing() {
        assert!(interpret("create a new folder").is_empty());
    }

    #[test]
    fn test_copy_move_delete() {
        assert_eq!(
            interpret("copy notes.txt to the archive folder"),
            vec![cmd("cp", ["notes.txt", "archive"])]
        );
        assert_eq!(
            interpret("rename draft.md to final.md"),
            vec![cmd("mv", ["draft.md", "final.md"])]
        );
        assert_eq!(interpret("delete old.txt"), vec![cmd("rm", ["old.txt"])]);
        assert_eq!(
            interpret("remove the folder called tmp"),
            vec![cmd("rmdir", ["tmp"])]
        );
        assert_eq!(interpret("remove all .log files"), vec![cmd("rm", ["*.log"])]);
    }

    #[test]
    fn test_move_into_it_without_referent() {
        assert!(interpret("move demo.txt into it").is_empty());
    }

    #[test]
    fn test_navigation() {
        assert_eq!(interpret("go to the docs folder"), vec![cmd("cd", ["docs"])]);
        assert_eq!(interpret("go up"), vec![cmd("cd", [".."])]);
        assert_eq!(interpret("go home"), vec![cmd("cd", [])]);
        assert_eq!(interpret("where am i?"), vec![cmd("pwd", [])]);
    }

    #[test]
    fn test_show_and_list() {
        assert_eq!(interpret("what's in notes.txt"), vec![cmd("cat", ["notes.txt"])]);
        assert_eq!(
            interpret("show the contents of readme.md"),
            vec![cmd("cat", ["readme.md"])]
        );
        assert_eq!(interpret("list files in src"), vec![cmd("ls", ["src"])]);
        assert_eq!(interpret("list files in ."), vec![cmd("ls", ["."])]);
        assert_eq!(
            interpret("what's in the current directory"),
            vec![cmd("ls", [])]
        );
        assert_eq!(interpret("list hidden files"), vec![cmd("ls", ["-a"])]);
    }

    #[test]
    fn test_system_queries() {
        assert_eq!(interpret("show me the cpu usage"), vec![cmd("cpu", [])]);
        assert_eq!(interpret("how much memory is free"), vec![cmd("mem", [])]);
        assert_eq!(interpret("which processes are running"), vec![cmd("ps", [])]);
        assert_eq!(interpret("how much disk space is left"), vec![cmd("disk", [])]);
    }

    #[test]
    fn test_misc() {
        assert_eq!(interpret("show my history"), vec![cmd("history", [])]);
        assert_eq!(interpret("clear the screen"), vec![cmd("clear", [])]);
        assert_eq!(interpret("what can you do"), vec![cmd("help", [])]);
        assert!(interpret("sing me a song").is_empty());
    }

    #[test]
    fn test_unsafe_names_rejected() {
        let request = InterpretationRequest {
            text: "create a folder called ../../etc",
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        assert!(matches!(
            PatternStrategy::default().try_interpret(&request),
            Err(InterpretError::UnsafeArgument(_))
        ));

        let request = InterpretationRequest {
            text: "create a folder called /etc/evil",
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        assert!(matches!(
            PatternStrategy::default().try_interpret(&request),
            Err(InterpretError::UnsafeArgument(_))
        ));

        let request = InterpretationRequest {
            text: "create a file called \"\"",
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        assert!(matches!(
            PatternStrategy::default().try_interpret(&request),
            Err(InterpretError::UnsafeArgument(_))
        ));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(" 'report.pdf', ").unwrap(), "report.pdf");
        assert_eq!(sanitize("a/b").unwrap(), "a/b");
        assert!(sanitize("a/../b").is_err());
        assert!(sanitize("/etc/passwd").is_err());
        assert_eq!(sanitize(".").unwrap(), ".");
        assert!(sanitize("   ").is_err());
    }

    #[test]
    fn test_custom_rule_table() {
        let strategy = PatternStrategy::new(vec![
            PatternRule::new("greet", |_| Ok(Some(vec![cmd("echo", ["hi"])]))).when_any(&["hello"]),
        ]);
        let request = InterpretationRequest {
            text: "Hello there",
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        assert_eq!(strategy.try_interpret(&request).unwrap(), vec![cmd("echo", ["hi"])]);
        assert_eq!(strategy.rules().collect::<Vec<_>>(), vec!["greet"]);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let strategy = PatternStrategy::new(vec![
            PatternRule::fixed("first", "pwd").when_any(&["where"]),
            PatternRule::fixed("second", "ls").when_any(&["where"]),
        ]);
        let request = InterpretationRequest {
            text: "where",
            current_dir: Path::new("/tmp"),
            available_commands: &[],
        };
        assert_eq!(strategy.try_interpret(&request).unwrap(), vec![cmd("pwd", [])]);
    }
}
