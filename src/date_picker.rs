//! A self-contained month-calendar widget for picking transaction dates.
//!
//! The widget is rendered server-side as an HTMX partial: month navigation
//! swaps the grid in place, and picking a day posts the ISO date string to
//! the draft-field endpoint.

use maud::{Markup, html};
use time::{Date, Duration, Month};

use crate::endpoints;

/// One month of the calendar, laid out as Monday-first week rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// The year being displayed.
    pub year: i32,
    /// The month being displayed.
    pub month: Month,
    /// Week rows of seven slots; `None` pads days outside the month.
    pub weeks: Vec<Vec<Option<Date>>>,
}

impl CalendarMonth {
    /// Build the grid for the month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Build the grid for a year and month.
    pub fn new(year: i32, month: Month) -> Self {
        let first = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
        let leading_slots = (first.weekday().number_from_monday() - 1) as usize;

        let mut weeks = Vec::new();
        let mut current_week: Vec<Option<Date>> = vec![None; leading_slots];

        let mut day = first;
        while day.month() == month {
            current_week.push(Some(day));

            if current_week.len() == 7 {
                weeks.push(current_week);
                current_week = Vec::new();
            }

            day += Duration::days(1);
        }

        if !current_week.is_empty() {
            current_week.resize(7, None);
            weeks.push(current_week);
        }

        Self { year, month, weeks }
    }

    /// The year and month preceding this one.
    pub fn prev(&self) -> (i32, Month) {
        match self.month {
            Month::January => (self.year - 1, Month::December),
            month => (self.year, month.previous()),
        }
    }

    /// The year and month following this one.
    pub fn next(&self) -> (i32, Month) {
        match self.month {
            Month::December => (self.year + 1, Month::January),
            month => (self.year, month.next()),
        }
    }

    /// The heading for the grid, e.g. "August 2025".
    pub fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

const DAY_BUTTON_STYLE: &str = "w-9 h-9 text-sm rounded-full text-gray-900 dark:text-white \
    hover:bg-blue-100 dark:hover:bg-gray-600";
const DAY_SELECTED_STYLE: &str = "w-9 h-9 text-sm rounded-full bg-blue-600 text-white";
const NAV_BUTTON_STYLE: &str = "px-2 py-1 text-sm rounded text-gray-700 dark:text-gray-300 \
    hover:bg-gray-100 dark:hover:bg-gray-600";

fn month_nav_url(year: i32, month: Month) -> String {
    format!(
        "{}?year={year}&month={}",
        endpoints::CALENDAR_PARTIAL,
        u8::from(month)
    )
}

/// Render the date picker for one month, highlighting `selected`.
pub fn date_picker(calendar: &CalendarMonth, selected: Date) -> Markup {
    let (prev_year, prev_month) = calendar.prev();
    let (next_year, next_month) = calendar.next();

    html! {
        div
            id="date-picker"
            class="mt-2 p-3 rounded border border-gray-300 dark:border-gray-600 \
                bg-white dark:bg-gray-700 w-fit"
        {
            div class="flex items-center justify-between mb-2"
            {
                button
                    type="button"
                    class=(NAV_BUTTON_STYLE)
                    hx-get=(month_nav_url(prev_year, prev_month))
                    hx-target="#date-picker"
                    hx-swap="outerHTML"
                {
                    "\u{2039} Prev"
                }

                span class="text-sm font-medium" { (calendar.title()) }

                button
                    type="button"
                    class=(NAV_BUTTON_STYLE)
                    hx-get=(month_nav_url(next_year, next_month))
                    hx-target="#date-picker"
                    hx-swap="outerHTML"
                {
                    "Next \u{203a}"
                }
            }

            table
            {
                thead
                {
                    tr class="text-xs text-gray-500 dark:text-gray-400"
                    {
                        @for weekday in ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"] {
                            th class="w-9 h-7 font-medium" { (weekday) }
                        }
                    }
                }

                tbody
                {
                    @for week in &calendar.weeks {
                        tr
                        {
                            @for slot in week {
                                td class="text-center"
                                {
                                    @match slot {
                                        Some(day) => {
                                            button
                                                type="button"
                                                class=(if *day == selected { DAY_SELECTED_STYLE } else { DAY_BUTTON_STYLE })
                                                hx-post=(endpoints::WORKFLOW_FIELD)
                                                hx-params="none"
                                                hx-vals=(format!(r#"{{"date": "{day}"}}"#))
                                                hx-target="#entry-form"
                                                hx-swap="outerHTML"
                                            {
                                                (day.day())
                                            }
                                        }
                                        None => {}
                                    }
                                }
                            }
                        }
                    }
                }
            }

            button
                type="button"
                class="mt-2 text-sm text-blue-600 dark:text-blue-400 underline"
                hx-post=(endpoints::CALENDAR_CLOSE)
                hx-target="#entry-form"
                hx-swap="outerHTML"
            {
                "Close"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use super::CalendarMonth;

    #[test]
    fn weeks_start_on_monday() {
        // 1 August 2025 is a Friday, so the first week has four leading pads.
        let calendar = CalendarMonth::new(2025, Month::August);

        let first_week = &calendar.weeks[0];
        assert_eq!(first_week.len(), 7);
        assert_eq!(&first_week[..4], &[None; 4]);
        assert_eq!(first_week[4], Some(date!(2025 - 08 - 01)));
    }

    #[test]
    fn grid_contains_every_day_exactly_once() {
        let calendar = CalendarMonth::new(2025, Month::August);

        let days: Vec<u8> = calendar
            .weeks
            .iter()
            .flatten()
            .filter_map(|slot| slot.map(|day| day.day()))
            .collect();

        assert_eq!(days, (1..=31).collect::<Vec<u8>>());
    }

    #[test]
    fn handles_leap_year_february() {
        let calendar = CalendarMonth::new(2024, Month::February);

        let day_count = calendar.weeks.iter().flatten().flatten().count();
        assert_eq!(day_count, 29, "want 29 days in February 2024");

        let non_leap = CalendarMonth::new(2025, Month::February);
        let day_count = non_leap.weeks.iter().flatten().flatten().count();
        assert_eq!(day_count, 28, "want 28 days in February 2025");
    }

    #[test]
    fn rows_are_always_seven_wide() {
        let calendar = CalendarMonth::new(2025, Month::June);

        for week in &calendar.weeks {
            assert_eq!(week.len(), 7);
        }
    }

    #[test]
    fn prev_and_next_wrap_across_years() {
        let january = CalendarMonth::new(2025, Month::January);
        assert_eq!(january.prev(), (2024, Month::December));

        let december = CalendarMonth::new(2025, Month::December);
        assert_eq!(december.next(), (2026, Month::January));
    }

    #[test]
    fn containing_uses_the_dates_month() {
        let calendar = CalendarMonth::containing(date!(2025 - 06 - 15));

        assert_eq!(calendar.year, 2025);
        assert_eq!(calendar.month, Month::June);
    }
}
