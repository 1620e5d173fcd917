use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, info, instrument, warn};

use crate::config::Selectors;
use crate::error::WatchError;
use crate::matcher;
use crate::model::{GameRecord, GameStatus, Roster, WatchTarget};

/// Finds the game cards in a parsed listing page, in page order.
pub trait CardLocator: Send + Sync {
    fn cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;
}

/// Locates cards with a single CSS selector.
#[derive(Debug)]
pub struct SelectorCards {
    card: Selector,
}

impl SelectorCards {
    pub fn new(card_selector: &str) -> Result<Self, WatchError> {
        Ok(Self { card: compile(card_selector)? })
    }
}

impl CardLocator for SelectorCards {
    fn cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.card).collect()
    }
}

/// Turns the raw registration page into game records and statuses.
pub struct Extractor {
    cards: Box<dyn CardLocator>,
    header: Selector,
    roster: Selector,
    team: Selector,
    team_name: Selector,
    player_name: Selector,
    full_marker: Selector,
    full_text: String,
}

impl Extractor {
    pub fn new(selectors: &Selectors) -> Result<Self, WatchError> {
        let cards = SelectorCards::new(&selectors.card)?;
        Self::with_locator(Box::new(cards), selectors)
    }

    /// Same as [`Extractor::new`] but with a custom way of finding cards.
    pub fn with_locator(cards: Box<dyn CardLocator>, selectors: &Selectors) -> Result<Self, WatchError> {
        Ok(Self {
            cards,
            header: compile(&selectors.header)?,
            roster: compile(&selectors.roster)?,
            team: compile(&selectors.team)?,
            team_name: compile(&selectors.team_name)?,
            player_name: compile(&selectors.player_name)?,
            full_marker: compile(&selectors.full_marker)?,
            full_text: selectors.full_text.clone(),
        })
    }

    /// Read every well-formed game card on the page, in page order.
    /// Cards with a missing or short header are skipped.
    #[instrument(level = "info", skip(self, body), fields(bytes = body.len()))]
    pub fn extract(&self, body: &[u8]) -> Result<Vec<GameRecord>, WatchError> {
        let text = std::str::from_utf8(body).map_err(|e| WatchError::Parse(format!("document is not UTF-8: {}", e)))?;
        let document = Html::parse_document(text);

        let cards = self.cards.cards(&document);
        let mut records = Vec::with_capacity(cards.len());
        for (index, card) in cards.into_iter().enumerate() {
            match self.read_card(card) {
                Some(record) => records.push(record),
                None => warn!(card = index, "Skipping game card with malformed header"),
            }
        }

        info!(records = records.len(), "Extracted game cards");
        Ok(records)
    }

    /// Extract the page and reconcile it against `targets`, one status per target.
    pub fn parse(
        &self,
        body: &[u8],
        targets: &[WatchTarget],
        season_year: i32,
        observed_at: DateTime<Utc>,
    ) -> Result<Vec<GameStatus>, WatchError> {
        let records = self.extract(body)?;
        Ok(matcher::reconcile(&records, targets, season_year, observed_at))
    }

    fn read_card(&self, card: ElementRef<'_>) -> Option<GameRecord> {
        let header = card.select(&self.header).next()?;
        let lines = header_lines(header);

        let [time, gym, game_type, level, ..] = lines.as_slice() else {
            debug!(lines = lines.len(), "Header has fewer than four lines");
            return None;
        };

        Some(GameRecord {
            time: time.clone(),
            gym: gym.clone(),
            game_type: game_type.clone(),
            level: level.clone(),
            roster: self.read_roster(card),
            full_marker: self.has_full_marker(card),
        })
    }

    fn read_roster(&self, card: ElementRef<'_>) -> Roster {
        let mut roster = Roster::new();
        let Some(section) = card.select(&self.roster).next() else {
            return roster;
        };

        for team in section.select(&self.team) {
            let name = team
                .select(&self.team_name)
                .map(|n| n.text().collect::<String>())
                .collect::<String>()
                .trim()
                .to_string();
            let players: Vec<String> = team
                .select(&self.player_name)
                .map(|p| strip_ordinal(p.text().collect::<String>().trim()).to_string())
                .collect();

            // repeated names share one entry so nobody drops out of the count
            if roster.contains_key(&name) {
                warn!(team = %name, "Team name repeated within a card, merging rosters");
            }
            roster.entry(name).or_default().extend(players);
        }
        roster
    }

    fn has_full_marker(&self, card: ElementRef<'_>) -> bool {
        card.select(&self.full_marker)
            .any(|el| el.text().collect::<String>().contains(&self.full_text))
    }
}

/// Header text split into trimmed, non-empty lines.
///
/// Text nodes are concatenated and `<br>` counts as a line break, so inline
/// markup inside a line does not split it.
fn header_lines(header: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    for node in header.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop a leading "<number>. " from a roster entry.
pub fn strip_ordinal(entry: &str) -> &str {
    match entry.split_once(". ") {
        Some((prefix, name)) if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => name.trim(),
        _ => entry,
    }
}

fn compile(selector: &str) -> Result<Selector, WatchError> {
    Selector::parse(selector).map_err(|e| WatchError::Config(format!("invalid selector {:?}: {}", selector, e)))
}
