//! Render-ready projections of the stores.
//!
//! Everything here is a pure function of its arguments. Hover state belongs
//! to whoever draws the cards and is passed in.

use std::borrow::Borrow;

use gallery_domain::{Continent, Country, TagSet};
use serde::Serialize;

use crate::preferences::Preferences;

/// Width of the layout grid in columns.
pub const GRID_COLUMNS: u32 = 12;

/// The continents to render: just the active one, or all of them in
/// display order.
pub fn continents_to_show(active: Option<Continent>) -> Vec<Continent> {
    match active {
        Some(continent) => vec![continent],
        None => Continent::ALL.to_vec(),
    }
}

/// Records on `continent`, in catalog order.
///
/// Hidden records are included. The `hidden` flag is tracked but this
/// filter has never consulted it; whether hidden flags should drop out of
/// their continent is an open product question.
pub fn countries_in_continent<C>(countries: &[C], continent: Continent) -> Vec<C>
where
    C: Borrow<Country> + Clone,
{
    countries
        .iter()
        .filter(|c| <C as Borrow<Country>>::borrow(c).continent == continent)
        .cloned()
        .collect()
}

/// Color image when colors are on or the card is hovered, outline otherwise.
pub fn image_url_for(country: &Country, show_colors: bool, hovering: bool) -> &str {
    if show_colors || hovering {
        &country.png_image
    } else {
        &country.png_outline
    }
}

/// Columns each card spans. Densities that do not divide the grid give a
/// fractional span, and zero gives infinity; both are passed through.
pub fn grid_span_for(items_per_row: u32) -> f64 {
    f64::from(GRID_COLUMNS) / f64::from(items_per_row)
}

/// Hover only changes the image in outline mode, so cards only need to
/// track the pointer then.
pub fn hover_tracking_enabled(show_colors: bool) -> bool {
    !show_colors
}

/// One flag as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagCard {
    pub code: String,
    pub name: String,
    pub image_url: String,
    pub span: f64,
    pub hidden: bool,
    pub tags: TagSet,
}

/// A heading and the flags under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentSection {
    pub continent: Continent,
    pub title: &'static str,
    pub cards: Vec<FlagCard>,
}

/// The whole gallery, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    pub show_colors: bool,
    pub items_per_row: u32,
    pub track_hover: bool,
    pub sections: Vec<ContinentSection>,
}

impl GalleryView {
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }

    pub fn find_card(&self, code: &str) -> Option<&FlagCard> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .find(|card| card.code == code)
    }
}

/// Build the full projection. `hovered` is the code under the pointer.
pub fn compose<C>(prefs: &Preferences, countries: &[C], hovered: Option<&str>) -> GalleryView
where
    C: Borrow<Country> + Clone,
{
    let span = grid_span_for(prefs.items_per_row);

    let sections = continents_to_show(prefs.active_continent)
        .into_iter()
        .map(|continent| {
            let cards = countries_in_continent(countries, continent)
                .iter()
                .map(|c| {
                    let country = <C as Borrow<Country>>::borrow(c);
                    let hovering = hovered == Some(country.code.as_str());
                    FlagCard {
                        code: country.code.clone(),
                        name: country.name.clone(),
                        image_url: image_url_for(country, prefs.show_colors, hovering)
                            .to_string(),
                        span,
                        hidden: country.hidden,
                        tags: country.tags.clone(),
                    }
                })
                .collect();

            ContinentSection {
                continent,
                title: continent.display_name(),
                cards,
            }
        })
        .collect();

    GalleryView {
        show_colors: prefs.show_colors,
        items_per_row: prefs.items_per_row,
        track_hover: hover_tracking_enabled(prefs.show_colors),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;

    fn country(code: &str, continent: Continent) -> Country {
        let lower = code.to_lowercase();
        Country::new(
            code,
            code,
            continent,
            format!("color/{lower}.png"),
            format!("outline/{lower}.png"),
        )
    }

    fn sample() -> Vec<Country> {
        vec![
            country("FR", Continent::Europe),
            country("JP", Continent::Asia),
            country("DE", Continent::Europe),
            country("AQ", Continent::Antarctica),
        ]
    }

    #[test]
    fn single_active_continent() {
        assert_eq!(continents_to_show(Some(Continent::Asia)), vec![Continent::Asia]);
    }

    #[test]
    fn all_continents_when_unfiltered() {
        assert_eq!(
            continents_to_show(None),
            vec![
                Continent::Europe,
                Continent::Asia,
                Continent::NorthAmerica,
                Continent::SouthAmerica,
                Continent::Africa,
                Continent::Oceania,
                Continent::Antarctica,
                Continent::None,
            ]
        );
    }

    #[test]
    fn filters_by_continent_in_order() {
        let europe = countries_in_continent(&sample(), Continent::Europe);
        let codes: Vec<&str> = europe.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["FR", "DE"]);
    }

    #[test]
    fn filter_works_on_shared_records() {
        let shared: Vec<Arc<Country>> = sample().into_iter().map(Arc::new).collect();
        let asia = countries_in_continent(&shared, Continent::Asia);
        assert_eq!(asia.len(), 1);
        assert!(Arc::ptr_eq(&asia[0], &shared[1]));
    }

    #[test]
    fn hidden_records_stay_in_their_continent() {
        let mut countries = sample();
        countries[0].hidden = true;
        let europe = countries_in_continent(&countries, Continent::Europe);
        assert_eq!(europe.len(), 2);
        assert!(europe[0].hidden);
    }

    #[test]
    fn empty_continent() {
        assert!(countries_in_continent(&sample(), Continent::Oceania).is_empty());
    }

    #[rstest]
    #[case(true, false, "color/fr.png")]
    #[case(true, true, "color/fr.png")]
    #[case(false, true, "color/fr.png")]
    #[case(false, false, "outline/fr.png")]
    fn image_selection(#[case] show_colors: bool, #[case] hovering: bool, #[case] expected: &str) {
        let fr = country("FR", Continent::Europe);
        assert_eq!(image_url_for(&fr, show_colors, hovering), expected);
    }

    #[rstest]
    #[case(1, 12.0)]
    #[case(2, 6.0)]
    #[case(3, 4.0)]
    #[case(4, 3.0)]
    #[case(6, 2.0)]
    #[case(12, 1.0)]
    #[case(24, 0.5)]
    fn spans(#[case] items_per_row: u32, #[case] expected: f64) {
        assert!((grid_span_for(items_per_row) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn non_divisor_spans_pass_through() {
        assert!((grid_span_for(5) - 2.4).abs() < 1e-12);
        assert!((grid_span_for(8) - 1.5).abs() < f64::EPSILON);
        assert!(grid_span_for(0).is_infinite());
    }

    #[test]
    fn hover_tracking_only_in_outline_mode() {
        assert!(!hover_tracking_enabled(true));
        assert!(hover_tracking_enabled(false));
    }

    #[test]
    fn compose_groups_and_styles_cards() {
        let prefs = Preferences {
            show_colors: false,
            items_per_row: 6,
            active_continent: None,
        };
        let view = compose(&prefs, &sample(), Some("DE"));

        assert_eq!(view.sections.len(), Continent::ALL.len());
        assert!(view.track_hover);
        assert_eq!(view.card_count(), 4);

        let europe = &view.sections[0];
        assert_eq!(europe.title, "Europe");
        assert_eq!(europe.cards[0].image_url, "outline/fr.png");
        assert_eq!(europe.cards[1].image_url, "color/de.png");
        assert!((europe.cards[0].span - 2.0).abs() < f64::EPSILON);

        assert!(view.sections[2].cards.is_empty());
    }

    #[test]
    fn compose_respects_active_continent() {
        let prefs = Preferences {
            active_continent: Some(Continent::Antarctica),
            ..Preferences::default()
        };
        let view = compose(&prefs, &sample(), None);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].cards[0].code, "AQ");
        assert_eq!(view.find_card("AQ").unwrap().image_url, "color/aq.png");
        assert!(view.find_card("FR").is_none());
    }

    #[test]
    fn compose_marks_hidden_cards() {
        let mut countries = sample();
        countries[1].hidden = true;
        let view = compose(&Preferences::default(), &countries, None);
        assert!(view.find_card("JP").unwrap().hidden);
    }
}
