//! Local steering rules.
//!
//! Every rule reads one consistent snapshot of the whole flock and returns a
//! velocity contribution for the agent at index `me`. Rules are global: every
//! other agent in the snapshot is a neighbor.

use crate::boid::{AgentState, Goal};
use crate::error::{BoidsError, BoidsResult};
use crate::vector::Vector3;

const MIN_FLOCK_FOR_AVERAGE: usize = 2;

fn others(me: usize, snapshot: &[AgentState]) -> impl Iterator<Item = &AgentState> {
    snapshot
        .iter()
        .enumerate()
        .filter(move |(j, _)| *j != me)
        .map(|(_, agent)| agent)
}

fn agent(me: usize, snapshot: &[AgentState]) -> BoidsResult<&AgentState> {
    snapshot.get(me).ok_or(BoidsError::AgentOutOfRange {
        index: me,
        len: snapshot.len(),
    })
}

fn require_flock_for_average(snapshot: &[AgentState]) -> BoidsResult<()> {
    if snapshot.len() < MIN_FLOCK_FOR_AVERAGE {
        return Err(BoidsError::InsufficientAgents {
            need: MIN_FLOCK_FOR_AVERAGE,
            have: snapshot.len(),
        });
    }
    Ok(())
}

/// Steers towards the centroid of every other agent.
pub fn cohesion(me: usize, snapshot: &[AgentState], clumping_weight: f64) -> BoidsResult<Vector3> {
    let this = agent(me, snapshot)?;
    require_flock_for_average(snapshot)?;

    let mut centroid = Vector3::ZERO;
    for other in others(me, snapshot) {
        centroid.add_in_place(other.position);
    }
    centroid.divide_in_place((snapshot.len() - 1) as f64)?;

    Ok(centroid.sub(this.position).scale(clumping_weight))
}

/// Pushes away from every agent closer than `min_distance`.
///
/// The raw sum is returned without averaging, so a crowded agent can get a
/// very large contribution; speed limiting is the only cap.
pub fn separation(me: usize, snapshot: &[AgentState], min_distance: f64) -> BoidsResult<Vector3> {
    let this = agent(me, snapshot)?;

    let mut push = Vector3::ZERO;
    for other in others(me, snapshot) {
        if this.position.distance_to(other.position) < min_distance {
            push.add_in_place(this.position.sub(other.position));
        }
    }

    Ok(push)
}

/// Steers towards the mean velocity of every other agent.
pub fn alignment(
    me: usize,
    snapshot: &[AgentState],
    schooling_weight: f64,
) -> BoidsResult<Vector3> {
    let this = agent(me, snapshot)?;
    require_flock_for_average(snapshot)?;

    let mut mean_velocity = Vector3::ZERO;
    for other in others(me, snapshot) {
        mean_velocity.add_in_place(other.velocity);
    }
    mean_velocity.divide_in_place((snapshot.len() - 1) as f64)?;

    Ok(mean_velocity.sub(this.velocity).scale(schooling_weight))
}

/// Moves a fraction `goal.weight` of the way towards the goal each tick.
pub fn tend_to_place(state: &AgentState, goal: &Goal) -> Vector3 {
    goal.position.sub(state.position).scale(goal.weight)
}

#[cfg(test)]
mod tests {
    use super::{alignment, cohesion, separation, tend_to_place};
    use crate::boid::{AgentState, Goal};
    use crate::error::BoidsError;
    use crate::vector::Vector3;

    fn state(position: (f64, f64, f64), velocity: (f64, f64, f64)) -> AgentState {
        AgentState {
            position: Vector3::new(position.0, position.1, position.2),
            velocity: Vector3::new(velocity.0, velocity.1, velocity.2),
        }
    }

    fn triangle() -> Vec<AgentState> {
        vec![
            state((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            state((10.0, 0.0, 0.0), (0.0, 2.0, 0.0)),
            state((0.0, 20.0, 0.0), (0.0, 0.0, 4.0)),
        ]
    }

    #[test]
    fn cohesion_points_at_centroid_of_others() {
        let snapshot = triangle();
        let steer = cohesion(0, &snapshot, 0.5).unwrap();
        assert_eq!(steer, Vector3::new(2.5, 5.0, 0.0));

        let steer = cohesion(1, &snapshot, 1.0).unwrap();
        assert_eq!(steer, Vector3::new(-10.0, 10.0, 0.0));
    }

    #[test]
    fn cohesion_with_a_single_agent_is_an_error() {
        let snapshot = vec![state((1.0, 1.0, 1.0), (0.0, 0.0, 0.0))];
        assert_eq!(
            cohesion(0, &snapshot, 0.01),
            Err(BoidsError::InsufficientAgents { need: 2, have: 1 })
        );
        assert_eq!(
            alignment(0, &snapshot, 0.125),
            Err(BoidsError::InsufficientAgents { need: 2, have: 1 })
        );
    }

    #[test]
    fn separation_sums_raw_offsets_from_close_agents() {
        let snapshot = vec![
            state((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            state((3.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            state((0.0, -4.0, 0.0), (0.0, 0.0, 0.0)),
            state((50.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ];

        let push = separation(0, &snapshot, 10.0).unwrap();
        assert_eq!(push, Vector3::new(-3.0, 4.0, 0.0));
    }

    #[test]
    fn separation_is_not_averaged() {
        let mut snapshot = vec![state((0.0, 0.0, 0.0), (0.0, 0.0, 0.0))];
        for _ in 0..5 {
            snapshot.push(state((-1.0, 0.0, 0.0), (0.0, 0.0, 0.0)));
        }

        assert_eq!(separation(0, &snapshot, 2.0).unwrap(), Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn separation_ignores_agents_at_exactly_min_distance() {
        let snapshot = vec![
            state((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            state((0.0, 0.0, 100.0), (0.0, 0.0, 0.0)),
        ];
        assert_eq!(separation(0, &snapshot, 100.0).unwrap(), Vector3::ZERO);
    }

    #[test]
    fn alignment_matches_mean_velocity_of_others() {
        let snapshot = triangle();
        let steer = alignment(0, &snapshot, 0.5).unwrap();
        assert_eq!(steer, Vector3::new(-0.5, 0.5, 1.0));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let snapshot = triangle();
        assert_eq!(
            separation(7, &snapshot, 1.0),
            Err(BoidsError::AgentOutOfRange { index: 7, len: 3 })
        );
        assert!(cohesion(3, &snapshot, 1.0).is_err());
    }

    #[test]
    fn tend_to_place_moves_a_fraction_of_the_way() {
        let goal = Goal::new(Vector3::new(100.0, 0.0, -50.0));
        let steer = tend_to_place(&state((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)), &goal);
        assert_eq!(steer, Vector3::new(1.0, 0.0, -0.5));
    }
}
