//! Unit tests for the objective functions and the constraint evaluator.

use asset_vns::objective::{
    distance_objective, is_feasible, team_count_objective, team_imbalance_objective, violation,
    violation_breakdown, Evaluator, Objective,
};
use asset_vns::problem::Problem;
use asset_vns::solution::{BinaryMatrix, Solution};

/// Two bases at positions 0 and 10, four assets at 1, 2, 11 and 12.
fn create_test_problem(eta: f64) -> Problem {
    let positions = [1.0_f64, 2.0, 11.0, 12.0];
    let bases = [0.0_f64, 10.0];
    let distances = positions
        .iter()
        .map(|p| bases.iter().map(|b| (p - b).abs()).collect())
        .collect();

    Problem::new(4, 2, 2, eta, distances).unwrap()
}

/// Team 0 at base 0 with assets 0 and 1, team 1 at base 1 with assets 2 and 3.
fn create_feasible_solution(problem: &Problem) -> Solution {
    Solution::from_assignment(problem, &[0, 0, 1, 1], &[Some(0), Some(1)], &[0, 0, 1, 1])
}

#[test]
fn test_distance_objective_single_base() {
    let distances = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
    let problem = Problem::new(4, 1, 2, 0.5, distances).unwrap();

    let split = Solution::from_assignment(&problem, &[0, 0, 0, 0], &[Some(0), Some(0)], &[0, 0, 1, 1]);
    let lopsided =
        Solution::from_assignment(&problem, &[0, 0, 0, 0], &[Some(0), Some(0)], &[1, 1, 1, 0]);

    // Team membership does not matter when every team sits at the only base
    assert_eq!(distance_objective(&problem, &split), 10.0);
    assert_eq!(distance_objective(&problem, &lopsided), 10.0);
}

#[test]
fn test_distance_objective_is_team_routed() {
    let problem = create_test_problem(0.5);
    let mut solution = create_feasible_solution(&problem);
    assert_eq!(distance_objective(&problem, &solution), 1.0 + 2.0 + 1.0 + 2.0);

    // Asset 0 stays attached to base 0 but is serviced by team 1 at base 1
    solution.set_team(0, 1);
    assert_eq!(distance_objective(&problem, &solution), 9.0 + 2.0 + 1.0 + 2.0);
    assert!(!is_feasible(&problem, &solution));
}

#[test]
fn test_team_objectives_diverge() {
    let distances = vec![vec![1.0]; 12];
    let problem = Problem::new(12, 1, 4, 0.1, distances).unwrap();

    // Loads [5, 5, 0, 2]
    let teams = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 3, 3];
    let placement = [Some(0), Some(0), Some(0), Some(0)];
    let solution = Solution::from_assignment(&problem, &[0; 12], &placement, &teams);

    assert_eq!(solution.team_loads(), vec![5, 5, 0, 2]);
    assert_eq!(team_count_objective(&solution), 3.0);
    assert_eq!(team_imbalance_objective(&solution), 3.0);

    // Loads [5, 1]: count and imbalance differ
    let distances = vec![vec![1.0]; 6];
    let problem = Problem::new(6, 1, 2, 0.1, distances).unwrap();
    let solution =
        Solution::from_assignment(&problem, &[0; 6], &[Some(0), Some(0)], &[0, 0, 0, 0, 0, 1]);

    assert_eq!(team_count_objective(&solution), 2.0);
    assert_eq!(team_imbalance_objective(&solution), 4.0);
}

#[test]
fn test_team_imbalance_without_active_teams() {
    let problem = create_test_problem(0.5);
    let solution = Solution::empty(&problem);

    assert_eq!(team_imbalance_objective(&solution), 0.0);
    assert_eq!(team_count_objective(&solution), 0.0);
}

#[test]
fn test_feasible_solution_has_zero_violation() {
    let problem = create_test_problem(0.5);
    let solution = create_feasible_solution(&problem);

    assert_eq!(violation(&problem, &solution), 0.0);
    assert!(is_feasible(&problem, &solution));
}

#[test]
fn test_team_on_two_bases() {
    let problem = create_test_problem(0.5);
    let mut solution = create_feasible_solution(&problem);
    solution.y.set(1, 0, true);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.team_to_one_base, 1.0);
    assert_eq!(breakdown.total(), 1.0);
}

#[test]
fn test_asset_without_base() {
    let problem = create_test_problem(0.5);
    let mut solution = create_feasible_solution(&problem);
    solution.x.clear_row(0);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.asset_to_one_base, 1.0);
    assert_eq!(breakdown.asset_team_matches_base, 1.0);
    assert_eq!(breakdown.total(), 2.0);
}

#[test]
fn test_asset_on_two_bases_is_squared() {
    let problem = create_test_problem(0.5);
    let mut solution = create_feasible_solution(&problem);
    solution.x.set(0, 1, true);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.asset_to_one_base, 1.0);
    assert!(!breakdown.is_structurally_sound());
}

#[test]
fn test_asset_on_base_without_team() {
    let distances = vec![vec![1.0, 2.0, 3.0]; 4];
    let problem = Problem::new(4, 3, 2, 0.5, distances).unwrap();
    let mut solution =
        Solution::from_assignment(&problem, &[0, 0, 1, 1], &[Some(0), Some(1)], &[0, 0, 1, 1]);

    // Base 2 hosts no team
    solution.x.clear_row(0);
    solution.x.set(0, 2, true);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.asset_base_has_team, 1.0);
    assert_eq!(breakdown.asset_team_matches_base, 1.0);
    assert_eq!(breakdown.total(), 2.0);
}

#[test]
fn test_asset_with_two_teams() {
    let problem = create_test_problem(0.5);
    let mut solution = create_feasible_solution(&problem);
    solution.h.set(0, 1, true);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.asset_to_one_team, 1.0);
    assert_eq!(breakdown.asset_team_matches_base, 1.0);
    assert_eq!(breakdown.minimum_team_load, 0.0);
}

#[test]
fn test_minimum_team_load() {
    // eta = 1.0, n = 4, s = 2: every active team needs two assets
    let problem = create_test_problem(1.0);
    assert_eq!(problem.min_team_load(), 2);

    let solution =
        Solution::from_assignment(&problem, &[0, 0, 0, 1], &[Some(0), Some(1)], &[0, 0, 0, 1]);

    let breakdown = violation_breakdown(&problem, &solution);
    assert_eq!(breakdown.minimum_team_load, 1.0);
    assert_eq!(breakdown.total(), 1.0);
    assert!(breakdown.is_structurally_sound());
}

#[test]
fn test_idle_team_is_not_a_violation() {
    let problem = create_test_problem(1.0);

    // Team 1 is stationed but serves nobody
    let solution =
        Solution::from_assignment(&problem, &[0, 0, 0, 0], &[Some(0), Some(1)], &[0, 0, 0, 0]);

    assert!(is_feasible(&problem, &solution));
}

#[test]
fn test_broken_matrix_never_feasible() {
    let problem = create_test_problem(0.5);
    let solution = Solution {
        x: BinaryMatrix::from_rows(&[vec![1, 1], vec![1, 0], vec![0, 1], vec![0, 1]]).unwrap(),
        y: BinaryMatrix::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap(),
        h: BinaryMatrix::from_rows(&[vec![1, 0], vec![1, 0], vec![0, 1], vec![0, 1]]).unwrap(),
    };

    assert!(violation(&problem, &solution) > 0.0);
    assert!(!is_feasible(&problem, &solution));
}

#[test]
fn test_evaluator_scores() {
    let problem = create_test_problem(0.5);
    let evaluator = Evaluator::new(&problem, Objective::Distance);

    // Upper bound: sum of the largest distance per asset
    assert_eq!(evaluator.penalty_weight(), 9.0 + 8.0 + 11.0 + 12.0 + 1.0);

    let feasible = create_feasible_solution(&problem);
    let evaluation = evaluator.evaluate(&feasible);
    assert!(evaluation.is_feasible());
    assert_eq!(evaluation.score, evaluation.value);

    let mut broken = feasible.clone();
    broken.set_team(0, 1);
    let evaluation = evaluator.evaluate(&broken);
    assert!(!evaluation.is_feasible());
    assert!(evaluation.score > evaluator.penalty_weight());
}

#[test]
fn test_objective_names() {
    assert_eq!("f1".parse::<Objective>().unwrap(), Objective::Distance);
    assert_eq!("f2".parse::<Objective>().unwrap(), Objective::TeamImbalance);
    assert_eq!("f2-count".parse::<Objective>().unwrap(), Objective::TeamCount);
    assert_eq!("team-count".parse::<Objective>().unwrap(), Objective::TeamCount);
    assert!("f3".parse::<Objective>().is_err());

    assert_eq!(Objective::TeamCount.to_string(), "f2-count");
    assert_eq!(serde_json::to_string(&Objective::TeamImbalance).unwrap(), "\"f2\"");
    assert_eq!(
        serde_json::from_str::<Objective>("\"distance\"").unwrap(),
        Objective::Distance
    );
}

#[test]
fn test_objective_value_dispatch() {
    let problem = create_test_problem(0.5);
    let solution = create_feasible_solution(&problem);

    assert_eq!(Objective::Distance.value(&problem, &solution), 6.0);
    assert_eq!(Objective::TeamImbalance.value(&problem, &solution), 0.0);
    assert_eq!(Objective::TeamCount.value(&problem, &solution), 2.0);
}
