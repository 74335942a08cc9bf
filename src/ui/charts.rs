use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::aggregate::GroupMean;
use crate::data::model::DailyRecord;
use crate::data::view::{scatter_points, Measure};
use crate::state::{AppState, Tab};

const WEATHER_NOTE: &str = "Clear and partly cloudy skies draw the most rentals. \
Cloudy and overcast days stay popular, light rain or light snow still sees some \
demand, while heavy rain or heavy snow days see almost none: bad weather hits \
the bike sharing service directly.";

const WEEKDAY_NOTE: &str = "Rentals on working days and weekends are close. \
The steady weekday volume most likely comes from commuting to and from work, \
which weighs heavily in the working day versus holiday comparison.";

const CLIMATE_NOTE: &str = "Warmer temperatures go with noticeably more rentals \
than cold ones. Humidity matters less, with most rentals at moderate levels. \
Rentals concentrate on days with a light breeze rather than strong wind.";

// ---------------------------------------------------------------------------
// Tabs (central panel)
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
}

/// Render the analysis for the selected tab.
pub fn tab_content(ui: &mut Ui, state: &AppState) {
    match state.tab {
        Tab::Weather => {
            ui.heading("Effect of weather conditions on bike rentals");
            ui.label(WEATHER_NOTE);
            ui.add_space(8.0);
            bar_chart(
                ui,
                "weather_chart",
                "Average rentals by weather condition",
                "Weather condition",
                &state.view.weather,
                &state.weather_colors,
            );
        }
        Tab::Weekday => {
            ui.heading("Rentals on working days versus weekends");
            ui.label(WEEKDAY_NOTE);
            ui.add_space(8.0);
            bar_chart(
                ui,
                "weekday_chart",
                "Average rentals by day",
                "Day",
                &state.view.weekday,
                &state.weekday_colors,
            );
        }
        Tab::Climate => {
            ui.heading("Effect of temperature, humidity and wind speed on bike rentals");
            ui.label(CLIMATE_NOTE);
            ui.add_space(8.0);
            if state.view.is_empty() {
                empty_notice(ui);
                return;
            }
            let records = &state.view.records;
            ui.columns(Measure::ALL.len(), |cols: &mut [Ui]| {
                for (col, measure) in cols.iter_mut().zip(Measure::ALL) {
                    scatter_plot(col, records, measure);
                }
            });
        }
    }
}

fn empty_notice(ui: &mut Ui) {
    ui.label(RichText::new("No records in the selected range.").italics());
}

// ---------------------------------------------------------------------------
// Bar chart of per-category means
// ---------------------------------------------------------------------------

fn bar_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    x_label: &str,
    table: &[GroupMean],
    colors: &CategoryColors,
) {
    ui.strong(title);
    if table.is_empty() {
        empty_notice(ui);
        return;
    }

    // One bar per row, placed at 0, 1, 2, … so the axis can be labelled.
    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean)
                .name(format!("{} ({} days)", g.label, g.count))
                .fill(colors.color_for(g.code))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = table.iter().map(|g| g.label.clone()).collect();

    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label("Average rentals")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .view_aspect(2.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title));
        });
}

// ---------------------------------------------------------------------------
// Scatter plot of one measure against rentals
// ---------------------------------------------------------------------------

fn measure_color(measure: Measure) -> Color32 {
    match measure {
        Measure::Temperature => Color32::from_rgb(31, 119, 180),
        Measure::Humidity => Color32::from_rgb(44, 160, 44),
        Measure::Windspeed => Color32::from_rgb(214, 39, 40),
    }
}

fn scatter_plot(ui: &mut Ui, records: &[DailyRecord], measure: Measure) {
    ui.strong(format!("{} vs. rentals", measure.name()));
    let points: PlotPoints = scatter_points(records, measure).into();

    Plot::new(("scatter", measure.name()))
        .x_axis_label(measure.axis_label())
        .y_axis_label("Rentals")
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .view_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(measure.name())
                    .color(measure_color(measure))
                    .radius(2.5),
            );
        });
}
