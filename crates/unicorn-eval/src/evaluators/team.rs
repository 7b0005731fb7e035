use std::sync::OnceLock;

use regex::Regex;
use unicorn_core::{normalize, Category, FactorSum, Scalar};
use unicorn_reference::ReferenceTables;

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::{Employment, Founder, StartupProfile};

const MATCH_SCORE: f64 = 95.0;
const NO_MATCH_SCORE: f64 = 60.0;
const HARD_COMPANY_BONUS_YEARS: f64 = 3.0;
const COMPLETENESS_BONUS: u8 = 5;

pub struct TeamEvaluator;

impl CategoryEvaluator for TeamEvaluator {
    fn category(&self) -> Category {
        Category::Team
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Team);
        let founders = profile
            .team
            .as_ref()
            .map(|t| t.founders.as_slice())
            .unwrap_or_default();
        if founders.is_empty() {
            return unicorn_core::to_score(default);
        }

        let mut acc = FactorSum::new();
        acc.add(founder_count_score(founders.len()));
        for founder in founders {
            score_founder(founder, ctx.tables, default, &mut acc);
        }

        let score = acc.finish(default);
        if founders.len() >= 2 && acc.factors() > 5.0 {
            score.saturating_add(COMPLETENESS_BONUS).min(100)
        } else {
            score
        }
    }
}

fn score_founder(founder: &Founder, tables: &ReferenceTables, default: f64, acc: &mut FactorSum) {
    acc.add(match_score(founder.background.as_deref(), default, |t| {
        tables.industries.mentioned_in(t)
    }));
    acc.add(match_score(founder.university.as_deref(), default, |t| {
        tables.universities.mentioned_in(t)
    }));
    acc.add(match_score(founder.degree.as_deref(), default, |t| {
        tables.degrees.mentioned_in(t)
    }));
    acc.add(normalize(founder.network_strength.as_ref(), 0.0, 1000.0, default));
    acc.add(age_score(founder.age.as_ref(), default));
    acc.add(employment_score(&founder.previous_employments, tables, default));
    acc.add(normalize(founder.linkedin_posts_last_30d.as_ref(), 0.0, 20.0, default));
}

pub fn founder_count_score(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 65.0,
        2..=3 => 100.0,
        _ => 80.0,
    }
}

fn match_score(text: Option<&str>, default: f64, matches: impl Fn(&str) -> bool) -> f64 {
    match present(text) {
        Some(t) if matches(t) => MATCH_SCORE,
        Some(_) => NO_MATCH_SCORE,
        None => default,
    }
}

pub fn age_score(age: Option<&Scalar>, default: f64) -> f64 {
    let Some(age) = age.and_then(Scalar::as_number) else {
        return default;
    };
    match age.trunc() {
        a if (25.0..=35.0).contains(&a) => 100.0,
        a if (36.0..=45.0).contains(&a) => 90.0,
        a if (46.0..=55.0).contains(&a) => 80.0,
        a if (20.0..=24.0).contains(&a) => 70.0,
        _ => NO_MATCH_SCORE,
    }
}

fn year_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\b\d{4}\b").ok())
        .as_ref()
}

fn year_in(text: &str) -> Option<f64> {
    year_pattern()?
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn is_ongoing(end: Option<&str>) -> bool {
    present(end).is_none_or(|e| {
        e.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|w| matches!(w, "present" | "current" | "now" | "ongoing" | "today"))
    })
}

/// Years spent in one position: the difference of the years found in
/// `start` and `end`, 2 while ongoing or when either date is missing, 1 when
/// the dates are unreadable.
pub fn employment_years(job: &Employment) -> f64 {
    if present(job.start.as_deref()).is_none() || is_ongoing(job.end.as_deref()) {
        return 2.0;
    }
    let start = job.start.as_deref().and_then(year_in);
    let end = job.end.as_deref().and_then(year_in);
    match (start, end) {
        (Some(s), Some(e)) => (e - s).max(0.0),
        _ => 1.0,
    }
}

/// Career score: cumulative years, with bonus years and the premium tier
/// for positions at companies on the hardest-to-join list.
pub fn employment_score(jobs: &[Employment], tables: &ReferenceTables, default: f64) -> f64 {
    if jobs.is_empty() {
        return default;
    }
    let mut years = 0.0;
    let mut premium = false;
    for job in jobs {
        years += employment_years(job);
        let hard = job
            .company
            .as_deref()
            .is_some_and(|c| tables.hardest_companies.contains(c));
        if hard {
            years += HARD_COMPANY_BONUS_YEARS;
            premium = true;
        }
    }
    match (years >= 10.0, years >= 5.0, premium) {
        (true, _, true) => 100.0,
        (true, _, false) => 95.0,
        (false, true, true) => 90.0,
        (false, true, false) => 80.0,
        (false, false, true) => 75.0,
        (false, false, false) => 65.0,
    }
}
