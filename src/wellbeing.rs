/// Coarse reading of a 0-10 wellbeing score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    NoData,
    Thriving,
    Good,
    Okay,
    Low,
    Struggling,
}

impl ScoreBand {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => ScoreBand::NoData,
            Some(s) if s >= 8.0 => ScoreBand::Thriving,
            Some(s) if s >= 6.0 => ScoreBand::Good,
            Some(s) if s >= 4.0 => ScoreBand::Okay,
            Some(s) if s >= 2.0 => ScoreBand::Low,
            Some(_) => ScoreBand::Struggling,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreBand::NoData => "😶",
            ScoreBand::Thriving => "😊",
            ScoreBand::Good => "🙂",
            ScoreBand::Okay => "😐",
            ScoreBand::Low => "😔",
            ScoreBand::Struggling => "😢",
        }
    }
}

pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.1}/10"),
        None => "No data".to_string(),
    }
}
