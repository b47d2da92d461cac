//! The session's match list and manual selection workflow.

use chrono::Utc;
use entities::{CandidateOption, MatchMode, MatchRecord, MatchRequest, Meetup};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{CandidateGenerator, MatchStoreResult, Notification, Notifier};

/// Parameters of a manual request kept while the user is choosing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingManualRequest {
    pub location: String,
    pub time_slots: Vec<String>,
    pub is_anonymous: bool,
}

#[derive(Debug, Serialize)]
struct ManualSelection {
    request: PendingManualRequest,
    options: Vec<CandidateOption>,
}

/// Result of [`MatchStore::request_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A random-mode match was added at the front of the list.
    Created { id: Uuid },
    /// Manual candidates are ready to choose from.
    CandidatesReady { count: usize },
}

/// Single owner of the session's matches.
///
/// Records are kept newest first. Accepted records stay in place; declined
/// records are removed. Calls naming an unknown match or a candidate outside
/// the current list change nothing and notify no one.
pub struct MatchStore<R, N> {
    generator: CandidateGenerator<R>,
    notifier: N,
    matches: Vec<MatchRecord>,
    selection: Option<ManualSelection>,
}

impl<R: Rng, N: Notifier> MatchStore<R, N> {
    /// Creates an empty store.
    pub fn new(generator: CandidateGenerator<R>, notifier: N) -> Self {
        Self {
            generator,
            notifier,
            matches: Vec::new(),
            selection: None,
        }
    }

    /// Requests a meal buddy.
    ///
    /// Random mode creates a pending match right away. Manual mode replaces
    /// any ongoing selection with a fresh list of candidates and creates no
    /// match until one is selected.
    pub fn request_match(
        &mut self,
        location: &str,
        time_slots: &[String],
        is_anonymous: bool,
        mode: MatchMode,
    ) -> RequestOutcome {
        match mode {
            MatchMode::Random => RequestOutcome::Created {
                id: self.create_random(location, time_slots, is_anonymous),
            },
            MatchMode::Manual => {
                let options = self.generator.manual_options(location, time_slots);
                let count = options.len();
                if self.selection.is_some() {
                    debug!("Replacing ongoing manual selection");
                }
                info!(location, count, "Manual candidates ready");

                self.selection = Some(ManualSelection {
                    request: PendingManualRequest {
                        location: location.to_string(),
                        time_slots: time_slots.to_vec(),
                        is_anonymous,
                    },
                    options,
                });
                self.notifier.notify(
                    Notification::info(format!("Found {} potential buddies!", count))
                        .with_description(format!(
                            "Choose who you'd like to meet at {}",
                            location
                        )),
                );
                RequestOutcome::CandidatesReady { count }
            }
        }
    }

    /// Submits a request built by the view layer.
    pub fn submit(&mut self, request: &MatchRequest) -> RequestOutcome {
        self.request_match(
            &request.location,
            &request.time_slots,
            request.is_anonymous,
            request.mode,
        )
    }

    /// Joins `location` right now with a visible random match.
    pub fn join_location(&mut self, location: &str) -> Uuid {
        let request = MatchRequest::join_now(location);
        let id = self.create_random(&request.location, &request.time_slots, request.is_anonymous);
        self.notifier.notify(
            Notification::success(format!("Joining {}!", location))
                .with_description("Finding a meal buddy for you..."),
        );
        id
    }

    /// Joins an announced meetup with a visible random match at its time.
    pub fn join_meetup(&mut self, meetup: &Meetup) -> Uuid {
        let request = meetup.request();
        let id = self.create_random(&request.location, &request.time_slots, request.is_anonymous);
        info!(meetup_id = meetup.id, match_id = %id, "Joined meetup");
        self.notifier.notify(
            Notification::success(format!("Joined meetup at {}!", meetup.location))
                .with_description(format!("You'll meet at {}", meetup.time)),
        );
        id
    }

    fn create_random(
        &mut self,
        location: &str,
        time_slots: &[String],
        is_anonymous: bool,
    ) -> Uuid {
        let record = self
            .generator
            .random_match(location, time_slots, is_anonymous);
        let id = record.id;
        info!(match_id = %id, location, "Created random match");

        self.notifier.notify(
            Notification::success("Match request created!").with_description(format!(
                "Looking for a meal buddy at {} for {}",
                location,
                record.time_label()
            )),
        );
        self.matches.insert(0, record);
        id
    }

    /// Commits one of the current manual candidates as a pending match.
    pub fn select_manual_candidate(&mut self, option: &CandidateOption) -> Option<&MatchRecord> {
        self.select_manual_candidate_by_id(option.id)
    }

    /// Commits the current manual candidate with the given ID.
    ///
    /// Returns `None` when no selection is in progress or the ID is not one
    /// of the offered candidates.
    pub fn select_manual_candidate_by_id(&mut self, option_id: Uuid) -> Option<&MatchRecord> {
        let Some(selection) = self.selection.as_mut() else {
            debug!(%option_id, "No manual selection in progress");
            return None;
        };
        let Some(index) = selection.options.iter().position(|o| o.id == option_id) else {
            debug!(%option_id, "Candidate is not in the current selection");
            return None;
        };

        let option = selection.options.swap_remove(index);
        self.selection = None;

        let record = option.into_record(Utc::now());
        info!(match_id = %record.id, location = %record.location, "Selected manual candidate");
        self.notifier.notify(
            Notification::success(format!("Match request sent to {}!", record.display_name))
                .with_description("They'll appear in your pending matches"),
        );
        self.matches.insert(0, record);
        self.matches.first()
    }

    /// Abandons the manual selection without creating a match.
    ///
    /// Returns true if a selection was in progress.
    pub fn cancel_manual_selection(&mut self) -> bool {
        let was_selecting = self.selection.take().is_some();
        debug!(was_selecting, "Cancelled manual selection");
        self.notifier.notify(Notification::info("Selection cancelled"));
        was_selecting
    }

    /// Accepts a match in place and confirms it to the user.
    ///
    /// Accepting an already accepted match leaves it unchanged but confirms
    /// again. Returns `None` for unknown IDs.
    pub fn accept_match(&mut self, id: Uuid) -> Option<&MatchRecord> {
        let Some(index) = self.matches.iter().position(|m| m.id == id) else {
            debug!(match_id = %id, "Accept ignored, match not found");
            return None;
        };

        if self.matches[index].accept() {
            info!(match_id = %id, "Accepted match");
        } else {
            debug!(match_id = %id, "Match already accepted");
        }
        self.notifier.notify(
            Notification::success("Match accepted! 🎉")
                .with_description("You can now chat with your meal buddy"),
        );
        self.matches.get(index)
    }

    /// Removes a match regardless of its status.
    ///
    /// Returns the removed record, or `None` for unknown IDs.
    pub fn decline_match(&mut self, id: Uuid) -> Option<MatchRecord> {
        let Some(index) = self.matches.iter().position(|m| m.id == id) else {
            debug!(match_id = %id, "Decline ignored, match not found");
            return None;
        };

        let record = self.matches.remove(index);
        info!(match_id = %id, "Declined match");
        self.notifier.notify(
            Notification::info("Match declined")
                .with_description("The match request has been removed"),
        );
        Some(record)
    }

    /// Returns every match, newest first.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Looks a match up by ID.
    pub fn get(&self, id: Uuid) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Returns the pending matches in list order.
    pub fn pending_matches(&self) -> Vec<&MatchRecord> {
        self.matches.iter().filter(|m| m.is_pending()).collect()
    }

    /// Returns the accepted matches in list order.
    pub fn accepted_matches(&self) -> Vec<&MatchRecord> {
        self.matches.iter().filter(|m| m.is_accepted()).collect()
    }

    /// Returns true while manual candidates are waiting for a choice.
    pub fn is_selecting_manual(&self) -> bool {
        self.selection.is_some()
    }

    /// Returns the current manual candidates, empty when not selecting.
    pub fn manual_options(&self) -> &[CandidateOption] {
        self.selection
            .as_ref()
            .map(|s| s.options.as_slice())
            .unwrap_or_default()
    }

    /// Returns the manual request being resolved, if any.
    pub fn pending_manual_request(&self) -> Option<&PendingManualRequest> {
        self.selection.as_ref().map(|s| &s.request)
    }

    /// Serializes the matches and any ongoing selection as JSON.
    pub fn snapshot_json(&self) -> MatchStoreResult<String> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            matches: &'a [MatchRecord],
            selection: Option<&'a ManualSelection>,
        }

        let snapshot = Snapshot {
            matches: &self.matches,
            selection: self.selection.as_ref(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use entities::{MatchStatus, ANONYMOUS_DISPLAY_NAME};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{NotificationKind, RecordingNotifier};

    type TestStore = MatchStore<StdRng, Arc<RecordingNotifier>>;

    fn store(seed: u64) -> (TestStore, Arc<RecordingNotifier>) {
        let recorder = Arc::new(RecordingNotifier::new());
        let generator = CandidateGenerator::new(StdRng::seed_from_u64(seed));
        (MatchStore::new(generator, Arc::clone(&recorder)), recorder)
    }

    fn slots(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn random_id(store: &mut TestStore, location: &str) -> Uuid {
        match store.request_match(location, &slots(&["12:00"]), false, MatchMode::Random) {
            RequestOutcome::Created { id } => id,
            other => panic!("Expected Created, got {:?}", other),
        }
    }

    #[test]
    fn test_random_request_creates_pending_match() {
        let (mut store, recorder) = store(1);

        let outcome =
            store.request_match("Cafeteria", &slots(&["12:30"]), false, MatchMode::Random);

        let RequestOutcome::Created { id } = outcome else {
            panic!("Expected Created");
        };
        assert_eq!(store.matches().len(), 1);
        let record = &store.matches()[0];
        assert_eq!(record.id, id);
        assert_eq!(record.location, "Cafeteria");
        assert_eq!(record.time_slots, slots(&["12:30"]));
        assert_eq!(record.status, MatchStatus::Pending);
        assert!(!record.is_anonymous);
        assert!(record.department.is_some());
        assert!((70..100).contains(&record.match_score));
        assert!(!store.is_selecting_manual());

        let notification = recorder.last().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title, "Match request created!");
        assert_eq!(
            notification.description.as_deref(),
            Some("Looking for a meal buddy at Cafeteria for 12:30")
        );
    }

    #[test]
    fn test_anonymous_random_request_hides_identity() {
        let (mut store, _) = store(2);

        store.request_match("Susam Café", &slots(&["11:30"]), true, MatchMode::Random);

        let record = &store.matches()[0];
        assert!(record.is_anonymous);
        assert_eq!(record.display_name, ANONYMOUS_DISPLAY_NAME);
        assert!(record.department.is_none());
    }

    #[test]
    fn test_newest_match_first() {
        let (mut store, _) = store(3);

        let first = random_id(&mut store, "Cafeteria");
        let second = random_id(&mut store, "Çarşı");

        let ids: Vec<Uuid> = store.matches().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_manual_request_starts_selection() {
        let (mut store, recorder) = store(4);
        let times = slots(&["13:00", "13:30"]);

        let outcome = store.request_match("Çarşı", &times, true, MatchMode::Manual);

        assert_eq!(outcome, RequestOutcome::CandidatesReady { count: 6 });
        assert!(store.is_selecting_manual());
        assert!(store.matches().is_empty());
        assert_eq!(store.manual_options().len(), 6);
        assert!(store
            .manual_options()
            .iter()
            .all(|o| o.location == "Çarşı" && o.time_slots == times));
        assert!(store
            .manual_options()
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
        assert_eq!(
            store.pending_manual_request(),
            Some(&PendingManualRequest {
                location: "Çarşı".to_string(),
                time_slots: times.clone(),
                is_anonymous: true,
            })
        );

        let notification = recorder.last().unwrap();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert_eq!(notification.title, "Found 6 potential buddies!");
    }

    #[test]
    fn test_select_manual_candidate() {
        let (mut store, recorder) = store(5);
        let times = slots(&["13:00", "13:30"]);
        store.request_match("Çarşı", &times, true, MatchMode::Manual);
        let chosen = store.manual_options()[2].clone();

        let record = store.select_manual_candidate(&chosen).unwrap().clone();

        assert_eq!(record.id, chosen.id);
        assert_eq!(record.display_name, chosen.display_name);
        assert_eq!(record.status, MatchStatus::Pending);
        assert!(!store.is_selecting_manual());
        assert!(store.manual_options().is_empty());
        assert!(store.pending_manual_request().is_none());
        assert_eq!(store.matches().len(), 1);
        assert_eq!(store.matches()[0].id, chosen.id);
        assert_eq!(
            recorder.last().unwrap().title,
            format!("Match request sent to {}!", chosen.display_name)
        );
    }

    #[test]
    fn test_select_foreign_candidate_is_noop() {
        let (mut store, recorder) = store(6);
        store.request_match("Cafeteria", &slots(&["12:00"]), false, MatchMode::Manual);
        let mut foreign = store.manual_options()[0].clone();
        foreign.id = Uuid::new_v4();
        let before = recorder.notifications().len();

        assert!(store.select_manual_candidate(&foreign).is_none());
        assert!(store.is_selecting_manual());
        assert_eq!(store.manual_options().len(), 6);
        assert!(store.matches().is_empty());
        assert_eq!(recorder.notifications().len(), before);
    }

    #[test]
    fn test_select_without_selection_is_noop() {
        let (mut store, _) = store(7);
        store.request_match("Cafeteria", &slots(&["12:00"]), false, MatchMode::Manual);
        let option = store.manual_options()[0].clone();
        store.cancel_manual_selection();

        assert!(store.select_manual_candidate(&option).is_none());
        assert!(store.matches().is_empty());
    }

    #[test]
    fn test_second_manual_request_replaces_options() {
        let (mut store, _) = store(8);
        store.request_match("Cafeteria", &slots(&["12:00"]), false, MatchMode::Manual);
        let stale = store.manual_options()[0].clone();

        store.request_match("Library Café", &slots(&["14:00"]), false, MatchMode::Manual);

        assert!(store
            .manual_options()
            .iter()
            .all(|o| o.location == "Library Café"));
        assert!(store.select_manual_candidate(&stale).is_none());
    }

    #[test]
    fn test_cancel_manual_selection() {
        let (mut store, recorder) = store(9);
        store.request_match("Cafeteria", &slots(&["12:00"]), false, MatchMode::Manual);

        assert!(store.cancel_manual_selection());
        assert!(!store.is_selecting_manual());
        assert!(store.manual_options().is_empty());
        assert!(store.pending_manual_request().is_none());
        assert!(store.matches().is_empty());
        assert_eq!(recorder.last().unwrap().title, "Selection cancelled");

        assert!(!store.cancel_manual_selection());
    }

    #[test]
    fn test_accept_match_is_idempotent() {
        let (mut store, recorder) = store(10);
        let older = random_id(&mut store, "Cafeteria");
        let id = random_id(&mut store, "Çarşı");

        let accepted = store.accept_match(id).unwrap();
        assert_eq!(accepted.status, MatchStatus::Accepted);
        assert_eq!(recorder.last().unwrap().title, "Match accepted! 🎉");
        recorder.clear();

        let again = store.accept_match(id).unwrap();
        assert_eq!(again.status, MatchStatus::Accepted);
        let notifications = recorder.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert_eq!(
            notifications[0].description.as_deref(),
            Some("You can now chat with your meal buddy")
        );

        assert_eq!(store.matches().len(), 2);
        assert_eq!(store.matches()[0].id, id);
        assert_eq!(store.get(older).unwrap().status, MatchStatus::Pending);
    }

    #[test]
    fn test_accept_unknown_is_noop() {
        let (mut store, recorder) = store(11);
        random_id(&mut store, "Cafeteria");
        let before = recorder.notifications().len();

        assert!(store.accept_match(Uuid::new_v4()).is_none());
        assert_eq!(store.pending_matches().len(), 1);
        assert_eq!(recorder.notifications().len(), before);
    }

    #[test]
    fn test_decline_match_removes_once() {
        let (mut store, recorder) = store(12);
        let keep = random_id(&mut store, "Cafeteria");
        let declined = random_id(&mut store, "Çarşı");

        let removed = store.decline_match(declined).unwrap();
        assert_eq!(removed.id, declined);
        assert_eq!(store.matches().len(), 1);
        assert_eq!(store.matches()[0].id, keep);
        assert_eq!(recorder.last().unwrap().title, "Match declined");

        assert!(store.decline_match(declined).is_none());
        assert_eq!(store.matches().len(), 1);
    }

    #[test]
    fn test_decline_after_accept_removes() {
        let (mut store, _) = store(13);
        let id = random_id(&mut store, "Cafeteria");

        store.accept_match(id);
        assert_eq!(store.accepted_matches().len(), 1);

        assert!(store.decline_match(id).is_some());
        assert!(store.accepted_matches().is_empty());
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_read_views_are_stable() {
        let (mut store, _) = store(14);
        let a = random_id(&mut store, "Cafeteria");
        random_id(&mut store, "Çarşı");
        let c = random_id(&mut store, "Susam Café");
        store.accept_match(a);
        store.accept_match(c);

        let pending: Vec<Uuid> = store.pending_matches().iter().map(|m| m.id).collect();
        let accepted: Vec<Uuid> = store.accepted_matches().iter().map(|m| m.id).collect();

        assert_eq!(pending.len(), 1);
        assert_eq!(accepted, vec![c, a]);
        assert_eq!(store.pending_matches(), store.pending_matches());
        assert_eq!(store.accepted_matches(), store.accepted_matches());
    }

    #[test]
    fn test_submit_request() {
        let (mut store, _) = store(15);
        let request = MatchRequest::join_now("Engineering Canteen");

        let outcome = store.submit(&request);

        assert!(matches!(outcome, RequestOutcome::Created { .. }));
        assert_eq!(store.matches()[0].time_slots, vec!["Now".to_string()]);
    }

    #[test]
    fn test_join_location() {
        let (mut store, recorder) = store(17);

        let id = store.join_location("Engineering Canteen");

        let record = store.get(id).unwrap();
        assert_eq!(record.location, "Engineering Canteen");
        assert_eq!(record.time_slots, vec!["Now".to_string()]);
        assert_eq!(record.status, MatchStatus::Pending);
        assert!(!record.is_anonymous);

        let titles: Vec<String> = recorder
            .notifications()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Match request created!", "Joining Engineering Canteen!"]
        );
        assert_eq!(
            recorder.last().unwrap().description.as_deref(),
            Some("Finding a meal buddy for you...")
        );
    }

    #[test]
    fn test_join_meetup() {
        let (mut store, recorder) = store(18);
        let meetup = Meetup::find(103).unwrap();
        random_id(&mut store, "Cafeteria");

        let id = store.join_meetup(meetup);

        assert_eq!(store.matches()[0].id, id);
        assert_eq!(store.matches()[0].location, "Library Café");
        assert_eq!(store.matches()[0].time_slots, vec!["14:00".to_string()]);
        assert!(!store.matches()[0].is_anonymous);

        let notification = recorder.last().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title, "Joined meetup at Library Café!");
        assert_eq!(notification.description.as_deref(), Some("You'll meet at 14:00"));
    }

    #[test]
    fn test_snapshot_json() {
        let (mut store, _) = store(16);
        random_id(&mut store, "Cafeteria");
        store.request_match("Çarşı", &slots(&["13:00"]), false, MatchMode::Manual);

        let json: serde_json::Value =
            serde_json::from_str(&store.snapshot_json().unwrap()).unwrap();

        assert_eq!(json["matches"].as_array().unwrap().len(), 1);
        assert_eq!(json["matches"][0]["status"], "pending");
        assert_eq!(json["selection"]["request"]["location"], "Çarşı");
        assert_eq!(json["selection"]["options"].as_array().unwrap().len(), 6);
    }
}
