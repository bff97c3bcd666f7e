//! Core WASM wrapper: one configured oscillator, integrated on demand.

use anyhow::{Context, Result};
use duffing_core::plot::{series_for, PlotConfig, PlotKind, PlotSeries};
use duffing_core::strobe::{stroboscopic_section, StrobePoint};
use duffing_core::{
    integrate_with, DuffingParams, IntegrationSettings, PositionRate, StepScheme, TimeWindow,
    Trajectory, VelocityRate,
};
use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmDuffing {
    pub(crate) params: DuffingParams,
    pub(crate) settings: IntegrationSettings,
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn serialize<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Failed to serialize {what}: {err}")))
}

impl WasmDuffing {
    pub(crate) fn build(nu: f64, forcing: f64, scheme: &str) -> Result<Self> {
        let scheme: StepScheme = scheme.parse()?;
        Ok(Self {
            params: DuffingParams::new(nu, forcing),
            settings: IntegrationSettings { scheme },
        })
    }

    pub(crate) fn run(&self, a: f64, b: f64, x0: f64, y0: f64) -> Result<Trajectory> {
        integrate_with(
            TimeWindow::new(a, b),
            x0,
            y0,
            self.params,
            &PositionRate,
            &VelocityRate,
            self.settings,
        )
        .with_context(|| format!("Integration over [{a}, {b}] failed"))
    }

    pub(crate) fn section(
        &self,
        a: f64,
        b: f64,
        x0: f64,
        y0: f64,
        periods: usize,
    ) -> Result<Vec<StrobePoint>> {
        let trajectory = self.run(a, b, x0, y0)?;
        Ok(stroboscopic_section(&trajectory, periods)?)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn series(
        &self,
        kind: &str,
        a: f64,
        b: f64,
        x0: f64,
        y0: f64,
        periods: usize,
        config: PlotConfig,
    ) -> Result<PlotSeries> {
        let kind: PlotKind = kind.parse()?;
        let trajectory = self.run(a, b, x0, y0)?;
        series_for(kind, &trajectory, periods, config)
            .with_context(|| format!("Failed to build {kind:?} series"))
    }
}

#[wasm_bindgen]
impl WasmDuffing {
    #[wasm_bindgen(constructor)]
    pub fn new(nu: f64, forcing: f64, scheme: &str) -> Result<WasmDuffing, JsValue> {
        console_error_panic_hook::set_once();
        Self::build(nu, forcing, scheme).map_err(to_js_error)
    }

    pub fn set_params(&mut self, nu: f64, forcing: f64) {
        self.params = DuffingParams::new(nu, forcing);
    }

    pub fn get_params(&self) -> Vec<f64> {
        vec![self.params.nu, self.params.forcing]
    }

    pub fn get_scheme(&self) -> String {
        self.settings.scheme.name().to_string()
    }

    /// Full trajectory as `{ t, x, y, x_rate, y_rate, dt }`.
    pub fn integrate(&self, a: f64, b: f64, x0: f64, y0: f64) -> Result<JsValue, JsValue> {
        let trajectory = self.run(a, b, x0, y0).map_err(to_js_error)?;
        serialize(&trajectory, "trajectory")
    }

    pub fn time_grid(&self, a: f64, b: f64) -> Result<Float64Array, JsValue> {
        let grid = TimeWindow::new(a, b)
            .time_grid()
            .map_err(|err| to_js_error(err.into()))?;
        Ok(Float64Array::from(grid.as_slice()))
    }

    pub fn stroboscopic_section(
        &self,
        a: f64,
        b: f64,
        x0: f64,
        y0: f64,
        periods: u32,
    ) -> Result<JsValue, JsValue> {
        let section = self
            .section(a, b, x0, y0, periods as usize)
            .map_err(to_js_error)?;
        serialize(&section, "stroboscopic section")
    }

    /// `config` may be `undefined`/`null` for the default styling.
    #[allow(clippy::too_many_arguments)]
    pub fn plot_series(
        &self,
        kind: &str,
        a: f64,
        b: f64,
        x0: f64,
        y0: f64,
        periods: u32,
        config: JsValue,
    ) -> Result<JsValue, JsValue> {
        let config: PlotConfig = if config.is_undefined() || config.is_null() {
            PlotConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| JsValue::from_str(&format!("Invalid plot config: {err}")))?
        };
        let series = self
            .series(kind, a, b, x0, y0, periods as usize, config)
            .map_err(to_js_error)?;
        serialize(&series, "plot series")
    }
}
