//! Meal Record model
//!
//! One logged meal as produced by the meal-logging side of the app.
//! Read-only to the statistics engine.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Nutrients;

/// Closed categorical field with a fixed declaration order.
///
/// `VARIANTS` lists every variant in declaration order; majority votes
/// break ties in favor of the earlier variant.
pub trait Categorical: Copy + Eq + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_str(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == needle)
    }

    fn ordinal(&self) -> usize {
        Self::VARIANTS.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// Degree of industrial processing of a meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingLevel {
    Unprocessed,
    Processed,
    HighlyProcessed,
}

impl Categorical for ProcessingLevel {
    const VARIANTS: &'static [Self] = &[
        ProcessingLevel::Unprocessed,
        ProcessingLevel::Processed,
        ProcessingLevel::HighlyProcessed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ProcessingLevel::Unprocessed => "unprocessed",
            ProcessingLevel::Processed => "processed",
            ProcessingLevel::HighlyProcessed => "highly_processed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Categorical for Mood {
    const VARIANTS: &'static [Self] = &[Mood::Happy, Mood::Neutral, Mood::Sad];

    fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    High,
    Medium,
    Low,
}

impl Categorical for Energy {
    const VARIANTS: &'static [Self] = &[Energy::High, Energy::Medium, Energy::Low];

    fn as_str(&self) -> &'static str {
        match self {
            Energy::High => "high",
            Energy::Medium => "medium",
            Energy::Low => "low",
        }
    }
}

/// How full the user felt after the meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Satiety {
    Satisfied,
    Full,
    Hungry,
}

impl Categorical for Satiety {
    const VARIANTS: &'static [Self] = &[Satiety::Satisfied, Satiety::Full, Satiety::Hungry];

    fn as_str(&self) -> &'static str {
        match self {
            Satiety::Satisfied => "satisfied",
            Satiety::Full => "full",
            Satiety::Hungry => "hungry",
        }
    }
}

/// A logged meal
///
/// Missing nutrient fields deserialize as 0 and missing categorical
/// fields as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fats_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub sugar_g: f64,
    #[serde(default)]
    pub sodium_mg: f64,
    #[serde(default)]
    pub liquids_ml: f64,
    #[serde(default)]
    pub alcohol_g: f64,
    #[serde(default)]
    pub caffeine_mg: f64,
    #[serde(default)]
    pub processing_level: Option<ProcessingLevel>,
    /// 1-10 rating; 0 or absent means "unrated"
    #[serde(default)]
    pub meal_quality: Option<u8>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub energy: Option<Energy>,
    #[serde(default)]
    pub satiety: Option<Satiety>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

impl MealRecord {
    /// An empty meal at the given instant
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    /// Calendar day of the meal (UTC)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn nutrients(&self) -> Nutrients {
        Nutrients {
            calories: self.calories,
            protein: self.protein_g,
            carbs: self.carbs_g,
            fats: self.fats_g,
            fiber: self.fiber_g,
            sugar: self.sugar_g,
            sodium: self.sodium_mg,
            liquids: self.liquids_ml,
            alcohol: self.alcohol_g,
            caffeine: self.caffeine_mg,
        }
    }

    /// Quality rating with unrated meals mapped to `default`, capped at 10
    pub fn effective_quality(&self, default: u8) -> u8 {
        match self.meal_quality {
            None | Some(0) => default,
            Some(q) => q.min(10),
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(
            self.processing_level,
            Some(ProcessingLevel::Processed) | Some(ProcessingLevel::HighlyProcessed)
        )
    }

    /// Whether the description mentions any of the given keywords as a
    /// whole word. A plain "s"/"es" plural of a keyword also counts.
    pub fn mentions_any(&self, keywords: &[String]) -> bool {
        let Some(desc) = &self.description else {
            return false;
        };
        let desc = desc.to_lowercase();
        let keywords: Vec<String> = keywords.iter().map(|k| k.trim().to_lowercase()).collect();

        desc.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| {
                keywords.iter().any(|k| {
                    word == k
                        || word
                            .strip_prefix(k.as_str())
                            .is_some_and(|rest| rest == "s" || rest == "es")
                })
            })
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let timestamp_str: String = row.get("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        let allergens_json: String = row.get("allergens")?;
        let allergens: Vec<String> = serde_json::from_str(&allergens_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        let processing_level: Option<String> = row.get("processing_level")?;
        let mood: Option<String> = row.get("mood")?;
        let energy: Option<String> = row.get("energy")?;
        let satiety: Option<String> = row.get("satiety")?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            timestamp,
            description: row.get("description")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fats_g: row.get("fats_g")?,
            fiber_g: row.get("fiber_g")?,
            sugar_g: row.get("sugar_g")?,
            sodium_mg: row.get("sodium_mg")?,
            liquids_ml: row.get("liquids_ml")?,
            alcohol_g: row.get("alcohol_g")?,
            caffeine_mg: row.get("caffeine_mg")?,
            processing_level: processing_level.as_deref().and_then(ProcessingLevel::from_str),
            meal_quality: row.get("meal_quality")?,
            mood: mood.as_deref().and_then(Mood::from_str),
            energy: energy.as_deref().and_then(Energy::from_str),
            satiety: satiety.as_deref().and_then(Satiety::from_str),
            allergens,
        })
    }

    /// Insert a meal record, returning the stored row
    pub fn insert(conn: &Connection, data: &MealRecord) -> DbResult<Self> {
        let allergens = serde_json::to_string(&data.allergens)?;

        conn.execute(
            r#"
            INSERT INTO meal_records (
                user_id, timestamp, description,
                calories, protein_g, carbs_g, fats_g, fiber_g, sugar_g,
                sodium_mg, liquids_ml, alcohol_g, caffeine_mg,
                processing_level, meal_quality, mood, energy, satiety, allergens
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
            "#,
            params![
                data.user_id,
                format_timestamp(&data.timestamp),
                data.description,
                data.calories,
                data.protein_g,
                data.carbs_g,
                data.fats_g,
                data.fiber_g,
                data.sugar_g,
                data.sodium_mg,
                data.liquids_ml,
                data.alcohol_g,
                data.caffeine_mg,
                data.processing_level.map(|p| p.as_str()),
                data.meal_quality,
                data.mood.map(|m| m.as_str()),
                data.energy.map(|e| e.as_str()),
                data.satiety.map(|s| s.as_str()),
                allergens,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_records WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's meals in the half-open window `[start, end)`, oldest first
    pub fn list_for_window(
        conn: &Connection,
        user_id: &str,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM meal_records
            WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp < ?3
            ORDER BY timestamp ASC, id ASC
            "#,
        )?;

        let records = stmt
            .query_map(
                params![user_id, format_timestamp(start), format_timestamp(end)],
                Self::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meal_records WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

/// Fixed-width UTC form so stored timestamps compare lexicographically
/// Fixed-width UTC form, so text comparison in SQL orders like time
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
