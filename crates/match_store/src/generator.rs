//! Synthetic buddy generation.
//!
//! Buddies are sampled uniformly from the [`Catalog`]. Scores are cosmetic
//! and carry no meaning beyond display.

use std::collections::HashSet;

use chrono::Utc;
use entities::{CandidateOption, MatchRecord, ANONYMOUS_DISPLAY_NAME};
use rand::Rng;
use tracing::debug;
use uuid::{Builder, Uuid};

use crate::{Catalog, GeneratorConfig, MatchStoreResult};

/// Generates random-mode matches and manual-mode candidate lists.
///
/// The random source is injected so callers can pass a seeded generator.
#[derive(Debug)]
pub struct CandidateGenerator<R> {
    rng: R,
    config: GeneratorConfig,
    catalog: Catalog,
}

impl<R: Rng> CandidateGenerator<R> {
    /// Creates a generator with the default configuration and catalog.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: GeneratorConfig::default(),
            catalog: Catalog::default(),
        }
    }

    /// Creates a generator after validating `config` against `catalog`.
    pub fn with_config(
        rng: R,
        config: GeneratorConfig,
        catalog: Catalog,
    ) -> MatchStoreResult<Self> {
        config.validate()?;
        catalog.validate(config.exclude_sentinel_from_draws)?;
        Ok(Self {
            rng,
            config,
            catalog,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a single pending match for random mode.
    pub fn random_match(
        &mut self,
        location: &str,
        time_slots: &[String],
        is_anonymous: bool,
    ) -> MatchRecord {
        let display_name = if is_anonymous {
            ANONYMOUS_DISPLAY_NAME.to_string()
        } else {
            let names = self
                .catalog
                .drawable_names(self.config.exclude_sentinel_from_draws);
            pick(&mut self.rng, &names).to_string()
        };
        let score_range = self.config.random_score_min..self.config.random_score_max;

        let option =
            self.candidate(location, time_slots, display_name, is_anonymous, score_range);
        option.into_record(Utc::now())
    }

    /// Generates the configured number of manual-mode candidates.
    pub fn manual_options(
        &mut self,
        location: &str,
        time_slots: &[String],
    ) -> Vec<CandidateOption> {
        let count = self.config.manual_option_count;
        self.manual_options_with_count(location, time_slots, count)
    }

    /// Generates `count` manual-mode candidates, best score first.
    ///
    /// Drawn names are not repeated until every drawable name has been used.
    /// Ties keep generation order.
    pub fn manual_options_with_count(
        &mut self,
        location: &str,
        time_slots: &[String],
        count: usize,
    ) -> Vec<CandidateOption> {
        let mut options = self.draw_options(location, time_slots, count);
        options.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        debug!(location, count = options.len(), "Generated manual candidates");
        options
    }

    /// Draws manual-mode candidates in generation order.
    fn draw_options(
        &mut self,
        location: &str,
        time_slots: &[String],
        count: usize,
    ) -> Vec<CandidateOption> {
        let names: Vec<String> = self
            .catalog
            .drawable_names(self.config.exclude_sentinel_from_draws)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut used: HashSet<String> = HashSet::new();
        let mut options = Vec::with_capacity(count);

        for _ in 0..count {
            let unused: Vec<&String> = names.iter().filter(|n| !used.contains(*n)).collect();
            let name = if unused.is_empty() {
                pick(&mut self.rng, &names).clone()
            } else {
                pick(&mut self.rng, &unused).to_string()
            };
            used.insert(name.clone());

            let is_anonymous = self.rng.random_bool(self.config.manual_anonymous_chance);
            let display_name = if is_anonymous {
                ANONYMOUS_DISPLAY_NAME.to_string()
            } else {
                name
            };
            let score_range = self.config.manual_score_min..self.config.manual_score_max;

            options.push(self.candidate(
                location,
                time_slots,
                display_name,
                is_anonymous,
                score_range,
            ));
        }
        options
    }

    fn candidate(
        &mut self,
        location: &str,
        time_slots: &[String],
        display_name: String,
        is_anonymous: bool,
        score_range: std::ops::Range<u32>,
    ) -> CandidateOption {
        // A drawn sentinel hides the identity just like an explicit request.
        let is_anonymous = is_anonymous || display_name == ANONYMOUS_DISPLAY_NAME;

        let id = self.next_id();
        let interests = pick(&mut self.rng, &self.catalog.interests).clone();
        let match_score = self.rng.random_range(score_range);
        let department = if is_anonymous {
            None
        } else {
            Some(pick(&mut self.rng, &self.catalog.departments).clone())
        };
        let bio = Some(pick(&mut self.rng, &self.catalog.bios).clone());

        CandidateOption {
            id,
            display_name,
            is_anonymous,
            location: location.to_string(),
            time_slots: time_slots.to_vec(),
            interests,
            match_score,
            department,
            bio,
        }
    }

    fn next_id(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.random()).into_uuid()
    }
}

/// Picks one item uniformly. `items` must not be empty.
fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}
