use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Plank,
    Pushup,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 2] = [ExerciseType::Plank, ExerciseType::Pushup];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "plank" => Some(Self::Plank),
            "pushup" => Some(Self::Pushup),
            _ => None,
        }
    }

    /// Variant names defined for this kind, in display order.
    pub fn variant_names(self) -> &'static [&'static str] {
        match self {
            Self::Plank => &["regular", "forward-bend", "one-side"],
            Self::Pushup => &["regular", "diamond", "knee"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlankVariant {
    #[default]
    Regular,
    ForwardBend,
    OneSide,
}

impl PlankVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "regular" => Some(Self::Regular),
            "forward-bend" => Some(Self::ForwardBend),
            "one-side" => Some(Self::OneSide),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::ForwardBend => "forward-bend",
            Self::OneSide => "one-side",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushupVariant {
    #[default]
    Regular,
    Diamond,
    Knee,
}

impl PushupVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "regular" => Some(Self::Regular),
            "diamond" => Some(Self::Diamond),
            "knee" => Some(Self::Knee),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Diamond => "diamond",
            Self::Knee => "knee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Exercise kind together with its kind-specific variant.
///
/// Flattened into [`ExerciseEntry`], so the stored record keeps the flat
/// `exerciseType` / `variant` / `side` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "exerciseType", rename_all = "lowercase")]
pub enum Exercise {
    Plank {
        #[serde(default, deserialize_with = "lenient_plank_variant")]
        variant: PlankVariant,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        side: Option<Side>,
    },
    Pushup {
        #[serde(default, deserialize_with = "lenient_pushup_variant")]
        variant: PushupVariant,
    },
}

impl Exercise {
    /// Builds an exercise from loosely typed input. A missing variant means
    /// `regular`; a side is only kept for one-side planks.
    pub fn from_parts(
        kind: ExerciseType,
        variant: Option<&str>,
        side: Option<Side>,
    ) -> Option<Self> {
        match kind {
            ExerciseType::Plank => {
                let variant = match variant {
                    Some(name) => PlankVariant::parse(name)?,
                    None => PlankVariant::Regular,
                };
                Some(Self::plank(variant, side))
            }
            ExerciseType::Pushup => {
                let variant = match variant {
                    Some(name) => PushupVariant::parse(name)?,
                    None => PushupVariant::Regular,
                };
                Some(Self::Pushup { variant })
            }
        }
    }

    pub fn plank(variant: PlankVariant, side: Option<Side>) -> Self {
        let side = if variant == PlankVariant::OneSide { side } else { None };
        Self::Plank { variant, side }
    }

    pub fn kind(&self) -> ExerciseType {
        match self {
            Self::Plank { .. } => ExerciseType::Plank,
            Self::Pushup { .. } => ExerciseType::Pushup,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Plank { variant, .. } => variant.as_str(),
            Self::Pushup { variant } => variant.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Seconds for planks, repetitions for pushups.
    #[serde(default)]
    pub value: u32,
}

impl ExerciseEntry {
    pub fn kind(&self) -> ExerciseType {
        self.exercise.kind()
    }
}

/// Record shape written before pushups were tracked.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPlankEntry {
    pub id: String,
    pub timestamp: i64,
    pub duration: u32,
    #[serde(rename = "type", default)]
    pub variant: Option<String>,
}

impl From<LegacyPlankEntry> for ExerciseEntry {
    fn from(legacy: LegacyPlankEntry) -> Self {
        let variant = legacy
            .variant
            .as_deref()
            .and_then(PlankVariant::parse)
            .unwrap_or_default();
        Self {
            id: legacy.id,
            timestamp: legacy.timestamp,
            exercise: Exercise::plank(variant, None),
            value: legacy.duration,
        }
    }
}

fn lenient_plank_variant<'de, D>(deserializer: D) -> Result<PlankVariant, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PlankVariant::parse).unwrap_or_default())
}

fn lenient_pushup_variant<'de, D>(deserializer: D) -> Result<PushupVariant, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PushupVariant::parse).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub exercise_type: String,
    pub value: u32,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub value: u32,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeriesQuery {
    pub days: Option<usize>,
    pub range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTotals {
    pub variant: &'static str,
    pub total: u64,
    pub yesterday: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseStats {
    pub today_total: u64,
    pub weekly_average: u64,
    pub personal_best: u32,
    pub current_streak: u32,
    pub entry_count: usize,
    pub total_value: u64,
    pub variants: Vec<VariantTotals>,
}

impl ExerciseStats {
    pub fn variant(&self, name: &str) -> Option<&VariantTotals> {
        self.variants.iter().find(|totals| totals.variant == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub plank: ExerciseStats,
    pub pushup: ExerciseStats,
}

impl Statistics {
    pub fn for_kind(&self, kind: ExerciseType) -> &ExerciseStats {
        match kind {
            ExerciseType::Plank => &self.plank,
            ExerciseType::Pushup => &self.pushup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    /// Start of the local day, in milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub total_value: u64,
    pub entry_count: u32,
    pub moving_average: u64,
    pub is_today: bool,
}
