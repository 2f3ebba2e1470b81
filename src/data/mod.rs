pub mod metno;
pub mod openweather;
pub mod sun;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Ground height in metres; improves the temperature correction.
    pub altitude: Option<i32>,
}
