use graph_search::prelude::*;
use nanorand::{Rng, WyRand};
use std::f64::consts::SQRT_2;

/// Random Nodes in a 1000x1000 square, each with arcs to a few random others.
///
/// Every arc weighs at least the distance between its ends, so the planar heuristic is
/// consistent.
fn random_planar(
    nodes: usize,
    arcs_per_node: usize,
    seed: u64,
) -> (DirectedGraph, WeightMap<NodeId>, PlanarHeuristic<NodeId>) {
    let mut rng = WyRand::new_seed(seed);
    let mut graph = DirectedGraph::with_nodes(nodes);
    let mut weights = WeightMap::new();
    let mut heuristic = PlanarHeuristic::new();
    for id in graph.nodes() {
        let x = rng.generate_range(0_u32..1000) as f64;
        let y = rng.generate_range(0_u32..1000) as f64;
        heuristic.insert(id, (x, y));
    }
    for tail in graph.nodes() {
        for _ in 0..arcs_per_node {
            let head = rng.generate_range(0..nodes as NodeId);
            if head == tail {
                continue;
            }
            let distance = heuristic.distance(tail, head).unwrap();
            let stretch = 1.0 + rng.generate_range(0_u32..50) as f64 / 100.0;
            graph.add_arc(tail, head);
            weights.insert(tail, head, distance * stretch).unwrap();
        }
    }
    (graph, weights, heuristic)
}

fn assert_valid<W: WeightFunction<NodeId>>(path: &Path<NodeId>, weights: &W, expected: f64) {
    assert!(
        (path.cost() - expected).abs() < 1e-4,
        "expected {}, got {}",
        expected,
        path
    );
    let measured = Path::measure(path.nodes().to_vec(), weights).unwrap();
    assert!((measured.cost() - path.cost()).abs() < 1e-4);
}

#[test]
fn all_finders_agree_on_random_graphs() {
    for seed in 0..4 {
        let (graph, weights, heuristic) = random_planar(150, 3, seed);
        let mut rng = WyRand::new_seed(seed + 100);

        for kind in QueueKind::ALL {
            let ctx = SearchContext::new(&graph, &weights)
                .with_heuristic(&heuristic)
                .with_queue(kind.build().unwrap());

            for _ in 0..10 {
                let source = rng.generate_range(0_u32..150);
                let target = rng.generate_range(0_u32..150);
                let reference = dijkstra(&ctx, source, target).unwrap();

                for algorithm in Algorithm::ALL {
                    let path = algorithm.search(&ctx, source, target).unwrap();
                    if reference.is_empty() {
                        assert!(path.is_empty(), "{} with {}", algorithm, kind);
                        continue;
                    }
                    assert_eq!(path.source(), Some(&source));
                    assert_eq!(path.target(), Some(&target));
                    assert_valid(&path, &weights, reference.cost());
                }
            }
        }
    }
}

#[test]
fn source_equals_target() {
    let (graph, weights, heuristic) = random_planar(20, 2, 9);
    let stats = SearchStats::new();
    let ctx = SearchContext::new(&graph, &weights)
        .with_heuristic(&heuristic)
        .with_listener(&stats);

    for algorithm in Algorithm::ALL {
        let path = algorithm.search(&ctx, 7, 7).unwrap();
        assert_eq!(path, vec![7]);
        assert_eq!(path.cost(), 0.0);
    }
    assert_eq!(stats.searches(), Algorithm::ALL.len());
}

#[test]
fn disconnected_components() {
    // two triangles without a connection between them
    let mut graph = UndirectedGraph::with_nodes(6);
    let mut weights = WeightMap::new();
    for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
        graph.add_edge(a, b);
        weights.insert_symmetric(a, b, 1.0).unwrap();
    }
    let ctx = SearchContext::new(&graph, &weights).with_heuristic(&ZeroHeuristic);

    for algorithm in Algorithm::ALL {
        let path = algorithm.search(&ctx, 0, 4).unwrap();
        assert!(path.is_empty(), "{}", algorithm);
        assert!(path.cost().is_infinite());

        let path = algorithm.search(&ctx, 3, 5).unwrap();
        assert_eq!(path, vec![3, 5]);
    }
}

#[test]
fn grid_scenario() {
    for (config, expected) in [
        (GridConfig::default(), 2.0 * SQRT_2),
        (GridConfig::CARDINAL, 4.0),
    ] {
        let grid = GridGraph::new(3, 3, config);
        for kind in QueueKind::ALL {
            let ctx = SearchContext::new(&grid, &GridWeights)
                .with_heuristic(&Octile)
                .with_queue(kind.build().unwrap());
            for algorithm in Algorithm::ALL {
                let path = algorithm.search(&ctx, (0, 0), (2, 2)).unwrap();
                assert!(
                    (path.cost() - expected).abs() < 1e-9,
                    "{} with {}: {:?}",
                    algorithm,
                    kind,
                    path
                );
                assert_eq!(path.source(), Some(&(0, 0)));
                assert_eq!(path.target(), Some(&(2, 2)));
            }
        }
    }
}

fn walled_grid_with<H: HeuristicFunction<Point>>(grid: &GridGraph, heuristic: &H, expected: f64) {
    let ctx = SearchContext::new(grid, &GridWeights).with_heuristic(heuristic);
    for algorithm in Algorithm::ALL {
        let path = algorithm.search(&ctx, (0, 0), (10, 8)).unwrap();
        assert!((path.cost() - expected).abs() < 1e-9, "{}", algorithm);
        assert!(path.nodes().iter().all(|&p| !grid.is_wall(p)));
    }
}

#[test]
fn walled_grid() {
    // a comb of walls that forces a long detour
    let mut grid = GridGraph::new(11, 9, GridConfig::NO_CORNER_CUTTING);
    for x in [2, 5, 8] {
        for y in 0..8 {
            let y = if x == 5 { y + 1 } else { y };
            grid.set_wall((x, y));
        }
    }
    let ctx = SearchContext::new(&grid, &GridWeights);
    let reference = dijkstra(&ctx, (0, 0), (10, 8)).unwrap();
    assert!(!reference.is_empty());
    assert!(reference.cost() > 20.0);

    walled_grid_with(&grid, &Euclidean, reference.cost());
    walled_grid_with(&grid, &Octile, reference.cost());
    walled_grid_with(&grid, &Chebyshev, reference.cost());
}

#[test]
fn requires_a_heuristic() {
    let (graph, weights, _) = random_planar(10, 2, 3);
    let ctx = SearchContext::new(&graph, &weights);

    for algorithm in Algorithm::ALL {
        let result = algorithm.search(&ctx, 0, 1);
        if algorithm.needs_heuristic() {
            assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        } else {
            assert!(result.is_ok());
        }
    }
}

#[test]
fn rejects_unknown_nodes() {
    let (graph, weights, heuristic) = random_planar(10, 2, 3);
    let stats = SearchStats::new();
    let ctx = SearchContext::new(&graph, &weights)
        .with_heuristic(&heuristic)
        .with_listener(&stats);

    for algorithm in Algorithm::ALL {
        assert!(matches!(
            algorithm.search(&ctx, 0, 10),
            Err(SearchError::InvalidArgument(_))
        ));
        assert!(algorithm.search(&ctx, 99, 0).is_err());
    }
    assert_eq!(stats.searches(), 0);
}

#[test]
fn missing_weight_fails_the_search() {
    let mut graph = DirectedGraph::with_nodes(3);
    let mut weights = WeightMap::new();
    graph.add_arc(0, 1);
    graph.add_arc(1, 2);
    weights.insert(0, 1, 1.0).unwrap();

    let ctx = SearchContext::new(&graph, &weights).with_heuristic(&ZeroHeuristic);
    for algorithm in Algorithm::ALL {
        assert!(
            matches!(
                algorithm.search(&ctx, 0, 2),
                Err(SearchError::MissingEdgeWeight { .. })
            ),
            "{}",
            algorithm
        );
    }
}

#[test]
fn closure_weights() {
    // a line 0 - 1 - ... - 9 where every step costs its higher end
    let mut graph = UndirectedGraph::with_nodes(10);
    for i in 0..9 {
        graph.add_edge(i, i + 1);
    }
    let weights = |a: NodeId, b: NodeId| (a.abs_diff(b) == 1).then(|| a.max(b) as f64);
    let heuristic = |_: NodeId, _: NodeId| 0.0;
    let ctx = SearchContext::new(&graph, &weights).with_heuristic(&heuristic);

    for algorithm in Algorithm::ALL {
        let path = algorithm.search(&ctx, 0, 9).unwrap();
        assert_eq!(path.len(), 10);
        assert_eq!(path.cost(), 45.0);
    }
}
