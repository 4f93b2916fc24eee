pub mod bounds_sensor;
pub mod dots;
