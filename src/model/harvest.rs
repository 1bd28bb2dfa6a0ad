//! Turning member markers into limits.
//!
//! Every registered member carries a [`Markers`] set. When a type is
//! resolved, each harvester looks at a member's markers and may produce a
//! [`Limit`]. No result means no constraint; more than one is an ambiguous
//! declaration and resolving the type fails.
//!
//! Two harvesters are always present (ranges and explicit choice sets).
//! Hosts can add their own with [`register_harvester`], typically reading
//! free-form markers set through `Member::tag`.

use std::cell::RefCell;
use std::rc::Rc;

use super::limit::{Choice, Limit, Range};
use super::value::WidgetHint;
use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Markers
// =============================================================================

/// Declarative markers attached to one registered member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markers {
    pub(crate) description: Option<String>,
    pub(crate) hint: Option<WidgetHint>,
    pub(crate) minimums: Vec<f32>,
    pub(crate) maximums: Vec<f32>,
    pub(crate) decimals: Vec<u32>,
    pub(crate) choice_sets: Vec<Choice>,
    pub(crate) tags: Vec<(String, String)>,
}

impl Markers {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn hint(&self) -> Option<WidgetHint> {
        self.hint
    }

    pub fn minimums(&self) -> &[f32] {
        &self.minimums
    }

    pub fn maximums(&self) -> &[f32] {
        &self.maximums
    }

    pub fn decimals(&self) -> &[u32] {
        &self.decimals
    }

    pub fn choice_sets(&self) -> &[Choice] {
        &self.choice_sets
    }

    /// First tagged marker with the given key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Combine the markers of a getter and a setter.
    ///
    /// Descriptions and widget hints may be given on either half, but when
    /// both halves give one they must match. Everything else accumulates, so
    /// a bound declared on both halves is later reported as ambiguous.
    pub(crate) fn merge(mut self, other: Markers) -> Result<Markers, &'static str> {
        self.description = agreed(self.description, other.description).ok_or("description")?;
        self.hint = agreed(self.hint, other.hint).ok_or("widget hint")?;
        self.minimums.extend(other.minimums);
        self.maximums.extend(other.maximums);
        self.decimals.extend(other.decimals);
        self.choice_sets.extend(other.choice_sets);
        self.tags.extend(other.tags);
        Ok(self)
    }
}

/// `Some(merged)` when the two agree, `None` on conflict.
fn agreed<V: PartialEq>(a: Option<V>, b: Option<V>) -> Option<Option<V>> {
    match (a, b) {
        (Some(a), Some(b)) if a != b => None,
        (Some(a), _) => Some(Some(a)),
        (None, b) => Some(b),
    }
}

// =============================================================================
// Harvesters
// =============================================================================

/// A strategy that derives a limit from a member's markers.
pub trait LimitHarvester {
    /// Short name used in ambiguity reports.
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the markers say nothing this strategy understands.
    ///
    /// Ambiguity is reported with [`ambiguous`]; the owner and member are
    /// filled in by the caller.
    fn harvest(&self, markers: &Markers) -> ConfigResult<Option<Limit>>;
}

/// Reads independent minimum, maximum and decimals markers.
pub struct RangeHarvester;

impl LimitHarvester for RangeHarvester {
    fn name(&self) -> &'static str {
        "range"
    }

    fn harvest(&self, markers: &Markers) -> ConfigResult<Option<Limit>> {
        let minimum = single(&markers.minimums, "minimums")?;
        let maximum = single(&markers.maximums, "maximums")?;
        let decimals = single(&markers.decimals, "decimals")?;

        if minimum.is_none() && maximum.is_none() {
            return Ok(None);
        }
        Ok(Some(Limit::Range(Range::new(
            minimum,
            maximum,
            decimals.unwrap_or(0),
        )?)))
    }
}

/// Reads an explicit set of integers or strings declared on the member.
pub struct ChoiceOfHarvester;

impl LimitHarvester for ChoiceOfHarvester {
    fn name(&self) -> &'static str {
        "choice set"
    }

    fn harvest(&self, markers: &Markers) -> ConfigResult<Option<Limit>> {
        Ok(single(&markers.choice_sets, "choice sets")?.map(Limit::Choice))
    }
}

/// An ambiguity error not yet attributed to a member.
pub fn ambiguous(detail: impl Into<String>) -> ConfigError {
    ConfigError::AmbiguousLimit {
        owner: String::new(),
        member: String::new(),
        detail: detail.into(),
    }
}

fn single<V: Clone>(values: &[V], what: &str) -> ConfigResult<Option<V>> {
    match values {
        [] => Ok(None),
        [v] => Ok(Some(v.clone())),
        _ => Err(ambiguous(format!("{} {what} declared", values.len()))),
    }
}

thread_local! {
    static HARVESTERS: RefCell<Vec<Rc<dyn LimitHarvester>>> = RefCell::new(vec![
        Rc::new(RangeHarvester),
        Rc::new(ChoiceOfHarvester),
    ]);
}

/// Add a harvesting strategy for types resolved after this call.
pub fn register_harvester(harvester: impl LimitHarvester + 'static) {
    HARVESTERS.with(|h| h.borrow_mut().push(Rc::new(harvester)));
}

/// Where a member's limit comes from once harvested.
pub(crate) enum Harvested<P> {
    None,
    Fixed(Limit),
    /// Computed at query time by a producer function.
    Produced(P),
}

/// Run every strategy over one member.
///
/// `producers` are the query-time choice producers registered for the
/// member; they count as one more strategy.
pub(crate) fn harvest_limit<P: Clone>(
    owner: &str,
    member: &str,
    markers: &Markers,
    producers: &[P],
) -> ConfigResult<Harvested<P>> {
    let locate = |err: ConfigError| match err {
        ConfigError::AmbiguousLimit { detail, .. } => ConfigError::AmbiguousLimit {
            owner: owner.to_string(),
            member: member.to_string(),
            detail,
        },
        other => other,
    };

    let harvesters = HARVESTERS.with(|h| h.borrow().clone());
    let mut found: Vec<(&'static str, Harvested<P>)> = Vec::new();

    for harvester in &harvesters {
        if let Some(limit) = harvester.harvest(markers).map_err(locate)? {
            found.push((harvester.name(), Harvested::Fixed(limit)));
        }
    }
    if let Some(producer) = single(producers, "choice producers").map_err(locate)? {
        found.push(("choice producer", Harvested::Produced(producer)));
    }

    match found.len() {
        0 => Ok(Harvested::None),
        1 => Ok(found.pop().map_or(Harvested::None, |(_, h)| h)),
        _ => {
            let names: Vec<_> = found.iter().map(|(n, _)| *n).collect();
            Err(locate(ambiguous(names.join(" and "))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::default()
    }

    fn fixed(h: Harvested<()>) -> Option<Limit> {
        match h {
            Harvested::Fixed(l) => Some(l),
            _ => None,
        }
    }

    #[test]
    fn test_no_markers_no_limit() {
        let h = harvest_limit::<()>("T", "m", &markers(), &[]).unwrap();
        assert!(matches!(h, Harvested::None));
    }

    #[test]
    fn test_range_from_single_bound() {
        let mut m = markers();
        m.maximums.push(10.0);
        let limit = fixed(harvest_limit::<()>("T", "m", &m, &[]).unwrap());
        let range = limit.as_ref().and_then(Limit::as_range).copied().unwrap();
        assert_eq!(range.minimum(), None);
        assert_eq!(range.maximum(), Some(10.0));
    }

    #[test]
    fn test_decimals_alone_is_no_range() {
        let mut m = markers();
        m.decimals.push(2);
        assert!(fixed(harvest_limit::<()>("T", "m", &m, &[]).unwrap()).is_none());
    }

    #[test]
    fn test_repeated_minimum_is_ambiguous() {
        let mut m = markers();
        m.minimums.extend([0.0, 1.0]);
        let err = harvest_limit::<()>("T", "m", &m, &[]).err().unwrap();
        assert!(matches!(err, ConfigError::AmbiguousLimit { .. }));
    }

    #[test]
    fn test_inverted_bounds() {
        let mut m = markers();
        m.minimums.push(5.0);
        m.maximums.push(1.0);
        let err = harvest_limit::<()>("T", "m", &m, &[]).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }

    #[test]
    fn test_int_and_string_sets_are_ambiguous() {
        let mut m = markers();
        m.choice_sets.push(Choice::ints(&[1]));
        m.choice_sets.push(Choice::strings(&["a"]));
        assert!(harvest_limit::<()>("T", "m", &m, &[]).is_err());
    }

    #[test]
    fn test_range_and_choice_are_ambiguous() {
        let mut m = markers();
        m.minimums.push(0.0);
        m.choice_sets.push(Choice::ints(&[1]));
        let err = harvest_limit::<()>("Root", "count", &m, &[]).err().unwrap();
        assert_eq!(
            err,
            ConfigError::AmbiguousLimit {
                owner: "Root".into(),
                member: "count".into(),
                detail: "range and choice set".into()
            }
        );
    }

    #[test]
    fn test_producer_counts_as_strategy() {
        let h = harvest_limit("T", "m", &markers(), &[7]).unwrap();
        assert!(matches!(h, Harvested::Produced(7)));

        let mut m = markers();
        m.choice_sets.push(Choice::ints(&[1]));
        assert!(harvest_limit("T", "m", &m, &[7]).is_err());
        assert!(harvest_limit("T", "m", &markers(), &[7, 8]).is_err());
    }

    #[test]
    fn test_merge_agreement() {
        let mut a = markers();
        a.description = Some("x".into());
        let mut b = markers();
        b.hint = Some(WidgetHint::Colour);
        let merged = a.clone().merge(b).unwrap();
        assert_eq!(merged.description(), Some("x"));
        assert_eq!(merged.hint(), Some(WidgetHint::Colour));

        let mut c = markers();
        c.description = Some("y".into());
        assert_eq!(a.merge(c), Err("description"));
    }

    struct TaggedPercent;

    impl LimitHarvester for TaggedPercent {
        fn name(&self) -> &'static str {
            "percent"
        }

        fn harvest(&self, markers: &Markers) -> ConfigResult<Option<Limit>> {
            Ok(markers
                .tag("unit")
                .filter(|u| *u == "percent")
                .map(|_| Limit::Range(Range::NO_LIMIT)))
        }
    }

    #[test]
    fn test_registered_harvester() {
        register_harvester(TaggedPercent);
        let mut m = markers();
        m.tags.push(("unit".into(), "percent".into()));
        assert!(fixed(harvest_limit::<()>("T", "m", &m, &[]).unwrap()).is_some());
    }
}
