use prize_wheel_engine::backend::domain::RandomSource;

/// Draws from `Math.random()`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
