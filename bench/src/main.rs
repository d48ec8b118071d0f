use dyngraph_core::{kcore, verify_k_core, DynamicGraph, Vertex};
use std::time::Instant;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(200_000)
        .max(16);

    if mode == "help" || mode == "--help" {
        println!("Usage: dyngraph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  barbell     Two dense blocks connected by a thin bridge");
        println!("  periphery   Two dense cores with a large pendant periphery");
        println!();
        println!("Default vertex_count: 200000");
        println!("Set RUST_LOG=dyngraph_core=debug for engine logs.");
        return;
    }

    println!("dyngraph-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(usize) -> DynamicGraph)> = match mode {
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "barbell" => vec![("Barbell (block-bridge-block)", gen_barbell)],
        "periphery" => vec![("Dense cores + periphery", gen_periphery)],
        "all" => vec![
            ("Erdos-Renyi random", gen_random as fn(usize) -> DynamicGraph),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Barbell (block-bridge-block)", gen_barbell),
            ("Dense cores + periphery", gen_periphery),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    let mut all_ok = true;
    for (name, generator) in generators {
        all_ok &= run_benchmark(name, generator, vertex_count);
    }

    if !all_ok {
        std::process::exit(1);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

/// Returns false if any correctness check failed.
fn run_benchmark(name: &str, generator: fn(usize) -> DynamicGraph, vertex_count: usize) -> bool {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let mut graph = generator(vertex_count);
    println!(
        "Generated in {:.1}ms | {} vertices, {} edges, ~{:.0}MB",
        ms(t),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let t = Instant::now();
    graph.snapshot();
    println!("Snapshot in {:.1}ms", ms(t));

    // Routing batch: deterministic spread of pairs across the handle space
    let n = graph.vertex_count();
    let mut rng = FastRng::new(2024);
    let pairs: Vec<(Vertex, Vertex)> = (0..1000)
        .map(|_| (rng.next(n as u64) as Vertex, rng.next(n as u64) as Vertex))
        .collect();

    println!();
    println!("{:>8} {:>10} {:>12} {:>10}", "depth", "pairs", "found", "time");
    println!("{:->8} {:->10} {:->12} {:->10}", "", "", "", "");

    let mut baseline_paths = Vec::new();
    for depth in [1, 2, 3, 5, 8] {
        let t = Instant::now();
        let paths = graph.min_cost_routing(&pairs, depth);
        let elapsed = ms(t);
        println!(
            "{:>8} {:>10} {:>12} {:>8.1}ms",
            depth,
            pairs.len(),
            paths.iter().filter(|p| !p.is_empty()).count(),
            elapsed
        );
        if depth == 5 {
            baseline_paths = paths;
        }
    }

    // k-cores
    println!();
    let t = Instant::now();
    let cores = graph.k_cores();
    let degeneracy = cores.iter().copied().max().unwrap_or(0);
    println!("k_cores in {:.1}ms | degeneracy {}", ms(t), degeneracy);

    let mut ok = true;
    let view = graph.view();
    for k in [1, degeneracy / 2, degeneracy] {
        if k == 0 {
            continue;
        }
        let members = kcore::k_core_members(view, &cores, k);
        let t = Instant::now();
        let valid = verify_k_core(view, k, &members);
        println!(
            "k_core({}): {} members, correct = {} ({:.1}ms)",
            k,
            members.len(),
            if valid { "YES" } else { "NO" },
            ms(t)
        );
        ok &= valid;
    }

    // Mutate the live graph, confirm the snapshot does not move
    let t = Instant::now();
    let churn = (n / 10).max(1);
    for _ in 0..churn {
        let u = rng.next(n as u64) as Vertex;
        let v = rng.next(n as u64) as Vertex;
        match rng.next(3) {
            0 => graph.remove_vertex(u),
            1 => graph.remove_edge(u, v),
            _ => graph.add_edge(u, v),
        }
    }
    graph.add_vertex(n + 10);
    println!();
    println!("Applied {} live mutations in {:.1}ms", churn, ms(t));

    let stable = graph.min_cost_routing(&pairs, 5) == baseline_paths && graph.k_cores() == cores;
    println!("Snapshot stable under mutation: {}", if stable { "YES" } else { "NO" });
    ok &= stable;

    let t = Instant::now();
    graph.snapshot();
    let fresh = graph.k_cores();
    println!(
        "Re-snapshot + k_cores in {:.1}ms | {} vertices, degeneracy {}",
        ms(t),
        fresh.len(),
        fresh.iter().copied().max().unwrap_or(0)
    );

    info!(name, ok, "benchmark finished");
    println!();
    ok
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

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
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Erdos-Renyi: ~10 uniform random edges per vertex. No structure.
fn gen_random(vertex_count: usize) -> DynamicGraph {
    let mut graph = DynamicGraph::new(vertex_count);
    let mut rng = FastRng::new(54321);
    let n = vertex_count as u64;

    for _ in 0..vertex_count * 10 {
        let u = rng.next(n) as Vertex;
        let v = rng.next(n) as Vertex;
        graph.add_edge(u, v);
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Vertices are introduced one at a time with `add_vertex`, attaching to
/// endpoints of existing edges so high-degree vertices attract more.
fn gen_scale_free(vertex_count: usize) -> DynamicGraph {
    let edges_per_vertex = 5usize;
    let seed = 5usize.min(vertex_count);
    let mut graph = DynamicGraph::new(seed);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<Vertex> = Vec::with_capacity(vertex_count * edges_per_vertex * 2);

    for u in 0..seed {
        for v in (u + 1)..seed {
            graph.add_edge(u, v);
            endpoints.push(u);
            endpoints.push(v);
        }
    }

    for new_vertex in seed..vertex_count {
        graph.add_vertex(new_vertex);
        for _ in 0..edges_per_vertex.min(new_vertex) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            graph.add_edge(new_vertex, target);
            endpoints.push(new_vertex);
            endpoints.push(target);
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice with random rewiring.
fn gen_small_world(vertex_count: usize) -> DynamicGraph {
    let k = 5usize;
    let p = 0.05f64;
    let mut graph = DynamicGraph::new(vertex_count);
    let mut rng = FastRng::new(67890);

    for u in 0..vertex_count {
        for j in 1..=k {
            let v = if rng.next_f64() < p {
                rng.next(vertex_count as u64) as Vertex
            } else {
                (u + j) % vertex_count
            };
            graph.add_edge(u, v);
        }
    }

    graph
}

/// Barbell: two dense random blocks joined by a chain of bridge vertices.
///
/// Worst case for routing through a bottleneck.
fn gen_barbell(vertex_count: usize) -> DynamicGraph {
    let bridge_len = 10usize;
    let block = vertex_count.saturating_sub(bridge_len) / 2;
    let mut graph = DynamicGraph::new(2 * block + bridge_len);
    let mut rng = FastRng::new(99999);

    let b_start = block + bridge_len;
    for offset in [0, b_start] {
        for i in 0..block {
            for _ in 0..10 {
                let j = rng.next(block.max(1) as u64) as Vertex;
                graph.add_edge(offset + i, offset + j);
            }
        }
    }

    for i in block.saturating_sub(1)..b_start {
        graph.add_edge(i, i + 1);
    }

    graph
}

/// Two fully connected cores matched vertex-to-vertex, with every other
/// vertex hanging off a random core vertex.
fn gen_periphery(vertex_count: usize) -> DynamicGraph {
    let core = (vertex_count / 4).min(512);
    let mut graph = DynamicGraph::new(vertex_count);
    let mut rng = FastRng::new(12345);

    for offset in [0, core] {
        for u in 0..core {
            for v in (u + 1)..core {
                graph.add_edge(offset + u, offset + v);
            }
        }
    }
    for i in 0..core {
        graph.add_edge(i, core + i);
    }

    let core_span = (2 * core).max(1) as u64;
    for u in 2 * core..vertex_count {
        graph.add_edge(u, rng.next(core_span) as Vertex);
    }

    graph
}
