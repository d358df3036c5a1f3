//! Root component: a followers chart zoomed by a brush, with a theme switch

use std::cell::RefCell;
use std::rc::Rc;

use brushline_core::{
    ChartConfig, ChartData, CompactFormatter, DateFormatter, Result, SelectAreaConfig, SelectType, SelectionRange,
    Series, ThemeKey,
};
use brushline_state::{AppState, ThemeSwitched};
use leptos::html::Div;
use leptos::prelude::*;
use web_sys::HtmlDivElement;

use crate::surface::ChartSurface;

const SAMPLE_DATA: &str = include_str!("../assets/followers.json");

const CHART_WIDTH: f64 = 640.0;
const MAIN_HEIGHT: f64 = 420.0;
const BRUSH_HEIGHT: f64 = 72.0;

/// Brush window shown before the first drag
const INITIAL_RANGE: SelectionRange = SelectionRange::new(0.75, 0.0, 1.0, 1.0);

// ============================================================================
// CONFIGURATION
// ============================================================================

pub fn load_series() -> Result<Vec<Series>> {
    ChartData::from_json(SAMPLE_DATA)?.to_series()
}

pub fn main_config(series: Vec<Series>, theme: ThemeKey) -> ChartConfig {
    ChartConfig::new(CHART_WIDTH, MAIN_HEIGHT)
        .with_title("Followers")
        .with_series(series)
        .with_theme(theme)
        .with_x_formatter(DateFormatter::default())
        .with_y_formatter(CompactFormatter)
}

pub fn brush_config(series: Vec<Series>, theme: ThemeKey, range: SelectionRange) -> ChartConfig {
    let mut config = ChartConfig::new(CHART_WIDTH, BRUSH_HEIGHT)
        .without_title()
        .without_axes()
        .without_legend()
        .with_series(series)
        .with_theme(theme)
        .with_area_spacing(SelectAreaConfig::default().spacing)
        .with_select_area(SelectType::X, range);
    config.area_options.stroke_width = 1.0;
    config
}

// ============================================================================
// THEME CONTEXT
// ============================================================================

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<ThemeKey>,
}

pub fn provide_theme(theme: ThemeKey) -> ThemeContext {
    let context = ThemeContext {
        theme: RwSignal::new(theme),
    };
    provide_context(context);
    context
}

pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}

// ============================================================================
// COMPONENTS
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    let theme = provide_theme(ThemeKey::default()).theme;

    let page_style = move || {
        let styles = theme.get().styles();
        format!(
            "min-height: 100vh; padding: 24px; background: {}; color: {}; font-family: sans-serif",
            styles.main_background, styles.main_font
        )
    };

    let content = match load_series() {
        Ok(series) => view! { <BrushChart series=series /> }.into_any(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load chart data");
            view! { <div class="chart-error">{e.to_string()}</div> }.into_any()
        }
    };

    view! {
        <div class="brushline" style=page_style>
            {content}
            <ThemeSwitch />
        </div>
    }
}

/// Main chart and brush; remounted on every `ThemeSwitched`
#[component]
fn BrushChart(series: Vec<Series>) -> impl IntoView {
    let theme = use_theme().theme;
    let state = Rc::new(AppState::new(theme.get_untracked()).with_series(&series));
    let container = NodeRef::<Div>::new();
    let surface: Rc<RefCell<Option<ChartSurface>>> = Rc::default();

    // Weak so the bus does not keep its own state alive
    let on_theme = {
        let series = series.clone();
        let state = Rc::downgrade(&state);
        let surface = Rc::downgrade(&surface);
        move |e: &ThemeSwitched| {
            let (Some(state), Some(surface)) = (state.upgrade(), surface.upgrade()) else { return };
            let Some(div) = container.get_untracked() else { return };
            remount(&div, &surface, &series, e.0, state);
        }
    };
    state.bus().subscribe::<ThemeSwitched>(on_theme);

    Effect::new(move |_| {
        let theme = theme.get();
        if state.set_theme(theme) {
            return;
        }
        // First mount: the theme is already current, so nothing was published
        let Some(div) = container.get() else { return };
        remount(&div, &surface, &series, theme, Rc::clone(&state));
    });

    view! { <div class="chart-pair" node_ref=container></div> }
}

/// Replace the mounted pair, carrying the brush range over
fn remount(
    div: &HtmlDivElement,
    surface: &RefCell<Option<ChartSurface>>,
    series: &[Series],
    theme: ThemeKey,
    state: Rc<AppState>,
) {
    let range = surface
        .borrow_mut()
        .take()
        .and_then(|previous| previous.selection_range())
        .unwrap_or(INITIAL_RANGE);
    div.set_inner_html("");

    let main = main_config(series.to_vec(), theme);
    let brush = brush_config(series.to_vec(), theme, range);
    match ChartSurface::mount(div, main, brush, state) {
        Ok(mounted) => *surface.borrow_mut() = Some(mounted),
        Err(e) => tracing::error!(error = %e, "failed to mount charts"),
    }
}

#[component]
fn ThemeSwitch() -> impl IntoView {
    let theme = use_theme().theme;
    let style = move || {
        let styles = theme.get().styles();
        format!(
            "margin-top: 16px; border: none; background: none; cursor: pointer; font-size: 16px; color: {}",
            styles.main_font
        )
    };

    view! {
        <button class="theme-switch" style=style on:click=move |_| theme.update(|t| *t = t.toggle())>
            {move || theme.get().switch_label()}
        </button>
    }
}
