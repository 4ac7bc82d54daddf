use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidParams {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Time constant of the first-order derivative filter (s). Zero disables
    /// filtering.
    pub derivative_filter: f64,
    pub output_min: f64,
    pub output_max: f64,
}

impl Default for PidParams {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            derivative_filter: 0.0,
            output_min: f64::NEG_INFINITY,
            output_max: f64::INFINITY,
        }
    }
}

impl PidParams {
    pub fn proportional(kp: f64) -> Self {
        Self {
            kp,
            ..Default::default()
        }
    }
}

/// PID controller acting on an error signal.
///
/// The integrator only accumulates while the output is unsaturated or the
/// error drives it back out of saturation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    params: PidParams,
    integral: f64,
    previous_error: Option<f64>,
    derivative: f64,
}

impl Pid {
    pub fn new(params: PidParams) -> Self {
        Self {
            params,
            integral: 0.0,
            previous_error: None,
            derivative: 0.0,
        }
    }

    pub fn params(&self) -> &PidParams {
        &self.params
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = None;
        self.derivative = 0.0;
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let p = &self.params;

        if dt > 0.0 {
            if let Some(previous) = self.previous_error {
                let mut du = (error - previous) / dt;
                if !du.is_finite() {
                    debug!("PID derivative was non-finite, zeroing");
                    du = 0.0;
                }
                self.derivative = if p.derivative_filter > 0.0 {
                    let blend = dt / (p.derivative_filter + dt);
                    self.derivative + blend * (du - self.derivative)
                } else {
                    du
                };
            }
        }
        self.previous_error = Some(error);

        let unclamped = p.kp * error + p.ki * self.integral + p.kd * self.derivative;
        let output = unclamped.clamp(p.output_min, p.output_max);

        let saturated_high = unclamped >= p.output_max && error > 0.0;
        let saturated_low = unclamped <= p.output_min && error < 0.0;
        if dt > 0.0 && !saturated_high && !saturated_low {
            self.integral += error * dt;
        }

        output
    }
}
