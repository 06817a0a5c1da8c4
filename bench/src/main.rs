use digraph_core::Graph;
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: digraph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  tree      Branching tree (deep paths, no shortcuts)");
        println!("  random    Erdos-Renyi uniform random edges (parallel edges allowed)");
        println!("  barbell   Two dense clusters joined by a one-way bridge");
        println!("  ring      Directed ring with forward chords");
        println!();
        println!("Default vertex_count: 200000");
        return;
    }

    if vertex_count < 32 {
        eprintln!("vertex_count must be at least 32");
        return;
    }

    println!("digraph-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<String>)> = match mode {
        "tree" => vec![("Branching tree", gen_tree)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "ring" => vec![("Ring with chords", gen_ring)],
        "all" => vec![
            ("Branching tree", gen_tree as fn(u64) -> Graph<String>),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("Ring with chords", gen_ring),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<String>, vertex_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let mut graph = generator(vertex_count);
    println!(
        "Generated in {:.2}s: {} vertices, {} edges",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count()
    );

    let origin = id(0);
    let far = id(graph.vertex_count() as u64 - 1);

    // Neighborhood from vertex 0 (root or hub in every generator)
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let found = digraph_core::reachable_within(&graph, &origin, depth)
            .map(|r| r.len())
            .unwrap_or(0);
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            found,
            elapsed.as_secs_f64() * 1000.0
        );
        if found + 1 >= graph.vertex_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let connected = digraph_core::are_connected(&graph, &origin, &far);
    println!(
        "Connected {} → {}: {:?} in {:.1}ms",
        origin,
        far,
        connected,
        t.elapsed().as_secs_f64() * 1000.0
    );

    let t = Instant::now();
    match digraph_core::shortest_path(&graph, &origin, &far) {
        Ok(p) => println!(
            "Shortest path {} → {}: {} hops in {:.1}ms",
            origin,
            far,
            p.len() - 1,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Shortest path: {} ({:.1}ms)", e, t.elapsed().as_secs_f64() * 1000.0),
    }

    // Cascading removal scans every neighbor list once.
    let victim = id(graph.vertex_count() as u64 / 2);
    let in_degree = graph.in_degree(&victim);
    let t = Instant::now();
    graph.remove_vertex(&victim);
    println!(
        "Removed {} (in-degree {}) in {:.1}ms",
        victim,
        in_degree,
        t.elapsed().as_secs_f64() * 1000.0
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

fn id(n: u64) -> String {
    format!("v{}", n)
}

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

/// Each vertex gets 3 children. Log-depth paths, exponential width.
fn gen_tree(vertex_count: u64) -> Graph<String> {
    let branching = 3u64;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    graph.add_vertex(id(0));

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                graph.add_edge(id(parent), id(next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// ~10 random edges per vertex. Self-loops and parallel edges are kept.
fn gen_random(vertex_count: u64) -> Graph<String> {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..vertex_count {
        graph.add_vertex(id(i));
    }
    for _ in 0..vertex_count * 10 {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        graph.add_edge(id(from), id(to));
    }

    graph
}

/// Two dense clusters joined by a one-way chain of 10 bridge vertices.
///
/// Worst case for "find the path through the bottleneck"; the reverse
/// direction is unreachable.
fn gen_barbell(vertex_count: u64) -> Graph<String> {
    let bridge_len = 10u64;
    let cluster = (vertex_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(99999);

    let mut connect_cluster = |graph: &mut Graph<String>, base: u64| {
        for i in 0..cluster {
            graph.add_vertex(id(base + i));
        }
        for i in 0..cluster {
            for _ in 0..20u64.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    graph.add_edge(id(base + i), id(base + target));
                }
            }
        }
    };

    connect_cluster(&mut graph, 0);

    let bridge_start = cluster;
    graph.add_edge(id(cluster - 1), id(bridge_start));
    for i in 1..bridge_len {
        graph.add_edge(id(bridge_start + i - 1), id(bridge_start + i));
    }

    let b_start = bridge_start + bridge_len;
    connect_cluster(&mut graph, b_start);
    graph.add_edge(id(b_start - 1), id(b_start));

    // Keep the highest id last so run_benchmark targets the far cluster.
    let last = id(vertex_count - 1);
    graph.add_edge(id(b_start), last);

    graph
}

/// Directed ring 0→1→…→n-1→0 with a forward chord every 7 vertices.
fn gen_ring(vertex_count: u64) -> Graph<String> {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        graph.add_edge(id(i), id((i + 1) % vertex_count));
        if i % 7 == 0 {
            let jump = 2 + rng.next(vertex_count / 4);
            graph.add_edge(id(i), id((i + jump) % vertex_count));
        }
    }

    graph
}
