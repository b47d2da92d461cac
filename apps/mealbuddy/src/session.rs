//! Line-oriented terminal view over a match store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use entities::{
    is_known_slot, CampusLocation, CandidateOption, MatchMode, MatchRecord, MatchRequest,
    Meetup, RequestError, CAMPUS_LOCATIONS, UPCOMING_MEETUPS,
};
use match_store::{
    CandidateGenerator, LogNotifier, MatchStore, Notification, NotificationKind, Notifier,
    RequestOutcome,
};
use rand::Rng;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

const HELP: &str = "\
Commands:
  request <location> @ <slot>[,<slot>...] [anon] [manual]
  join <location> | join meetup <n>
  options | select <n> | cancel
  accept <id> | decline <id>
  pending | accepted
  locations [query] | trending | meetups
  dump | help | quit

<location> is a name or the number shown by `locations`; <n> for a meetup is
the number shown by `meetups` or its ID; <id> may be a prefix.";

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request(MatchRequest),
    JoinNow(&'static CampusLocation),
    JoinMeetup(&'static Meetup),
    Options,
    Select(usize),
    Cancel,
    Accept(String),
    Decline(String),
    Pending,
    Accepted,
    Locations(String),
    Trending,
    Meetups,
    Dump,
    Help,
    Quit,
}

/// Errors raised while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown meetup: {0}")]
    UnknownMeetup(String),

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_lowercase().as_str() {
            "request" => parse_request(rest).map(Self::Request),
            "join" => parse_join(rest),
            "options" => Ok(Self::Options),
            "select" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Self::Select)
                .ok_or(CommandError::Usage("select <n>")),
            "cancel" => Ok(Self::Cancel),
            "accept" if !rest.is_empty() => Ok(Self::Accept(rest.to_string())),
            "accept" => Err(CommandError::Usage("accept <id>")),
            "decline" if !rest.is_empty() => Ok(Self::Decline(rest.to_string())),
            "decline" => Err(CommandError::Usage("decline <id>")),
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "locations" => Ok(Self::Locations(rest.to_string())),
            "trending" => Ok(Self::Trending),
            "meetups" => Ok(Self::Meetups),
            "dump" => Ok(Self::Dump),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        };
        Some(command)
    }
}

fn parse_request(rest: &str) -> Result<MatchRequest, CommandError> {
    let (location, tail) = rest.split_once('@').unwrap_or((rest, ""));
    let mut tokens = tail.split_whitespace();
    let mut time_slots: Vec<String> = Vec::new();
    for slot in tokens.next().unwrap_or_default().split(',').map(str::trim) {
        if !slot.is_empty() && !time_slots.iter().any(|s| s == slot) {
            time_slots.push(slot.to_string());
        }
    }

    let mut request = MatchRequest::new(location.trim(), time_slots);
    for flag in tokens {
        match flag.to_lowercase().as_str() {
            "anon" | "anonymous" => request = request.with_anonymous(true),
            "visible" => request = request.with_anonymous(false),
            "manual" => request = request.with_mode(MatchMode::Manual),
            "random" => request = request.with_mode(MatchMode::Random),
            _ => {
                return Err(CommandError::Usage(
                    "request <location> @ <slot>[,<slot>...] [anon] [manual]",
                ))
            }
        }
    }

    finish_request(request)
}

fn parse_join(rest: &str) -> Result<Command, CommandError> {
    let usage = CommandError::Usage("join <location> | join meetup <n>");
    if rest.is_empty() {
        return Err(usage);
    }

    let (word, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if word.eq_ignore_ascii_case("meetup") && !tail.trim().is_empty() {
        let tail = tail.trim();
        let n = tail.parse::<u32>().map_err(|_| usage)?;
        return resolve_meetup(n)
            .map(Command::JoinMeetup)
            .ok_or_else(|| CommandError::UnknownMeetup(tail.to_string()));
    }

    resolve_location(rest)
        .map(Command::JoinNow)
        .ok_or_else(|| CommandError::UnknownLocation(rest.to_string()))
}

/// Finds a meetup by its number in the listing, then by ID.
fn resolve_meetup(n: u32) -> Option<&'static Meetup> {
    usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| UPCOMING_MEETUPS.get(i))
        .or_else(|| Meetup::find(n))
}

/// Validates the request and swaps the location for its catalog name.
fn finish_request(mut request: MatchRequest) -> Result<MatchRequest, CommandError> {
    request.validate()?;

    let location = resolve_location(&request.location)
        .ok_or_else(|| CommandError::UnknownLocation(request.location.clone()))?;
    request.location = location.name.to_string();

    if let Some(slot) = request.time_slots.iter().find(|s| !is_known_slot(s)) {
        return Err(CommandError::UnknownTimeSlot(slot.clone()));
    }
    Ok(request)
}

fn resolve_location(input: &str) -> Option<&'static CampusLocation> {
    match input.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| CAMPUS_LOCATIONS.get(i)),
        Err(_) => CampusLocation::find_by_name(input),
    }
}

/// Logs notifications and queues them until the session writes them out.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    queued: Mutex<Vec<Notification>>,
}

impl TerminalNotifier {
    /// Takes every queued notification, oldest first.
    pub fn take(&self) -> Vec<Notification> {
        self.queued
            .lock()
            .map(|mut queued| std::mem::take(&mut *queued))
            .unwrap_or_default()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        LogNotifier.notify(notification.clone());
        if let Ok(mut queued) = self.queued.lock() {
            queued.push(notification);
        }
    }
}

/// One user's session: a match store plus the commands that drive it.
pub struct Session<R> {
    store: MatchStore<R, Arc<TerminalNotifier>>,
    notifications: Arc<TerminalNotifier>,
    search_delay: Duration,
}

impl<R: Rng> Session<R> {
    /// Creates a session with an empty store over `generator`.
    pub fn new(generator: CandidateGenerator<R>, search_delay: Duration) -> Self {
        let notifications = Arc::new(TerminalNotifier::default());
        Self {
            store: MatchStore::new(generator, Arc::clone(&notifications)),
            notifications,
            search_delay,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &MatchStore<R, Arc<TerminalNotifier>> {
        &self.store
    }

    /// Takes the notifications not yet written out.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.take()
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub async fn run<I, O>(&mut self, input: I, mut output: O) -> std::io::Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"Type `help` for commands.\n").await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match Command::parse(&line) {
                None => continue,
                Some(Ok(Command::Quit)) => break,
                Some(Ok(command)) => self.execute(command).await,
                Some(Err(e)) => {
                    debug!(error = %e, "Rejected command");
                    vec![e.to_string()]
                }
            };
            let notices = self.take_notifications();
            for line in reply.into_iter().chain(notices.iter().map(format_notification)) {
                output.write_all(line.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.flush().await?;
        }

        Ok(())
    }

    /// Executes one command and returns the lines to show.
    pub async fn execute(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::Request(request) => {
                if !self.search_delay.is_zero() {
                    tokio::time::sleep(self.search_delay).await;
                }
                match self.store.submit(&request) {
                    RequestOutcome::Created { id } => self
                        .store
                        .get(id)
                        .map(|record| vec![format_record(record)])
                        .unwrap_or_default(),
                    RequestOutcome::CandidatesReady { .. } => self.list_options(),
                }
            }
            Command::JoinNow(location) => {
                let id = self.store.join_location(location.name);
                self.store
                    .get(id)
                    .map(|record| vec![format_record(record)])
                    .unwrap_or_default()
            }
            Command::JoinMeetup(meetup) => {
                let id = self.store.join_meetup(meetup);
                self.store
                    .get(id)
                    .map(|record| vec![format_record(record)])
                    .unwrap_or_default()
            }
            Command::Options => self.list_options(),
            Command::Select(n) => {
                let option = n
                    .checked_sub(1)
                    .and_then(|i| self.store.manual_options().get(i))
                    .cloned();
                let Some(option) = option else {
                    return vec![format!("No candidate #{}", n)];
                };
                self.store
                    .select_manual_candidate(&option)
                    .map(|record| vec![format_record(record)])
                    .unwrap_or_default()
            }
            Command::Cancel => {
                if !self.store.cancel_manual_selection() {
                    debug!("Cancel without an ongoing selection");
                }
                Vec::new()
            }
            Command::Accept(prefix) => match self.resolve_match(&prefix) {
                Ok(id) => self
                    .store
                    .accept_match(id)
                    .map(|record| vec![format_record(record)])
                    .unwrap_or_default(),
                Err(message) => vec![message],
            },
            Command::Decline(prefix) => match self.resolve_match(&prefix) {
                Ok(id) => {
                    self.store.decline_match(id);
                    Vec::new()
                }
                Err(message) => vec![message],
            },
            Command::Pending => list_records("pending", &self.store.pending_matches()),
            Command::Accepted => list_records("accepted", &self.store.accepted_matches()),
            Command::Locations(query) => list_locations(&CampusLocation::search(&query)),
            Command::Trending => list_locations(&CampusLocation::trending()),
            Command::Meetups => list_meetups(),
            Command::Dump => match self.store.snapshot_json() {
                Ok(json) => vec![json],
                Err(e) => {
                    warn!(error = %e, "Failed to serialize session");
                    vec![format!("Failed to dump session: {}", e)]
                }
            },
            Command::Help => vec![HELP.to_string()],
            Command::Quit => Vec::new(),
        }
    }

    fn list_options(&self) -> Vec<String> {
        let options = self.store.manual_options();
        if options.is_empty() {
            return vec!["No candidates to choose from".to_string()];
        }
        options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}", i + 1, format_option(option)))
            .collect()
    }

    /// Finds the single match whose ID starts with `prefix`.
    fn resolve_match(&self, prefix: &str) -> Result<Uuid, String> {
        let prefix = prefix.to_lowercase();
        let found: Vec<Uuid> = self
            .store
            .matches()
            .iter()
            .map(|m| m.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match found.as_slice() {
            [id] => Ok(*id),
            [] => Err(format!("No match with ID {}", prefix)),
            _ => Err(format!("ID {} is ambiguous", prefix)),
        }
    }
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn identity(name: &str, department: Option<&str>) -> String {
    match department {
        Some(department) => format!("{} ({})", name, department),
        None => name.to_string(),
    }
}

fn format_record(record: &MatchRecord) -> String {
    format!(
        "[{}] {} · {} · {} · {}% · {} · {}",
        short_id(record.id),
        identity(&record.display_name, record.department.as_deref()),
        record.location,
        record.time_label(),
        record.match_score,
        record.interests.join(", "),
        record.status.as_str(),
    )
}

fn format_option(option: &CandidateOption) -> String {
    format!(
        "{} · {}% · {} · {}",
        identity(&option.display_name, option.department.as_deref()),
        option.match_score,
        option.interests.join(", "),
        option.bio.as_deref().unwrap_or(""),
    )
}

fn format_notification(notification: &Notification) -> String {
    let icon = match notification.kind {
        NotificationKind::Success => "✔",
        NotificationKind::Info => "ℹ",
    };
    match &notification.description {
        Some(description) => format!("{} {} {}", icon, notification.title, description),
        None => format!("{} {}", icon, notification.title),
    }
}

fn list_meetups() -> Vec<String> {
    UPCOMING_MEETUPS
        .iter()
        .enumerate()
        .map(|(i, meetup)| {
            format!(
                "{}. {} at {} · {} going · {} spots left (#{})",
                i + 1,
                meetup.location,
                meetup.time,
                meetup.people,
                meetup.spots_left,
                meetup.id
            )
        })
        .collect()
}

fn list_records(label: &str, records: &[&MatchRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![format!("No {} matches", label)];
    }
    records.iter().map(|r| format_record(r)).collect()
}

fn list_locations(locations: &[&CampusLocation]) -> Vec<String> {
    if locations.is_empty() {
        return vec!["No locations found".to_string()];
    }
    locations
        .iter()
        .map(|location| {
            let number = CAMPUS_LOCATIONS
                .iter()
                .position(|l| l.name == location.name)
                .map(|i| i + 1)
                .unwrap_or_default();
            let marker = if location.trending { " 🔥" } else { "" };
            format!(
                "{:>2}. {}{} - {}",
                number, location.name, marker, location.description
            )
        })
        .collect()
}
