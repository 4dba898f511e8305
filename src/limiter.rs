use crate::vector::Vector3;

/// Clamps `velocity` to `max_speed`, keeping its direction. A non-positive
/// limit freezes the agent.
pub fn limit_speed(velocity: Vector3, max_speed: f64) -> Vector3 {
    if max_speed <= 0.0 {
        return Vector3::ZERO;
    }

    let speed = velocity.magnitude();
    if speed <= max_speed {
        return velocity;
    }

    velocity.scale(max_speed / speed)
}

#[cfg(test)]
mod tests {
    use super::limit_speed;
    use crate::vector::Vector3;

    #[test]
    fn fast_velocity_is_rescaled_to_the_limit() {
        let velocity = Vector3::new(30.0, -40.0, 120.0);
        let limited = limit_speed(velocity, 100.0);

        assert!((limited.magnitude() - 100.0).abs() < 1.0e-12);
        assert!(limited
            .unit()
            .unwrap()
            .approx_eq(velocity.unit().unwrap(), 1.0e-12));
    }

    #[test]
    fn slow_velocity_passes_through_untouched() {
        let velocity = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(limit_speed(velocity, 5.0), velocity);
        assert_eq!(limit_speed(velocity, 100.0), velocity);
    }

    #[test]
    fn limit_is_not_applied_per_axis() {
        let limited = limit_speed(Vector3::new(10.0, 10.0, 0.0), 10.0);

        assert!((limited.x - limited.y).abs() < 1.0e-12);
        assert!(limited.x < 10.0);
        assert!((limited.magnitude() - 10.0).abs() < 1.0e-12);
    }

    #[test]
    fn zero_limit_freezes_the_agent() {
        assert_eq!(limit_speed(Vector3::new(1.0, 2.0, 3.0), 0.0), Vector3::ZERO);
        assert_eq!(limit_speed(Vector3::ZERO, 0.0), Vector3::ZERO);
    }
}
