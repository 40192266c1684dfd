//! Hanging grid example: a synthetic street grid swinging as a web.
//!
//! Builds a 9x9 grid network, starts the simulation with a console
//! render target, and runs two seconds of ticks. Every half second it
//! prints how far the grid's center has sagged below its rest position.
//!
//! Run with: `cargo run -p roadweb-core --example hanging_grid`

use roadweb_core::config::SimConfig;
use roadweb_core::id::NodeId;
use roadweb_core::model::{Network, NetworkNode, NetworkWay};
use roadweb_core::render::{RenderTarget, WorldFrame};
use roadweb_core::sim::Simulation;

/// Prints a one-line summary instead of drawing pixels.
struct ConsoleTarget {
    ticks: u64,
}

impl RenderTarget for ConsoleTarget {
    fn attach(&mut self, width: f32, height: f32) -> Result<(), String> {
        println!("attached {width}x{height} surface");
        Ok(())
    }

    fn draw(&mut self, frame: &WorldFrame) {
        self.ticks += 1;
        if self.ticks % 30 == 0 {
            let center = frame
                .bodies
                .iter()
                .find(|b| b.id == NodeId(404))
                .expect("center node");
            println!(
                "tick {:3}: center at ({:7.2}, {:7.2}), {} strands",
                self.ticks,
                center.x,
                center.y,
                frame.links.len()
            );
        }
    }

    fn detach(&mut self) {
        println!("surface released after {} ticks", self.ticks);
    }
}

fn grid_network(n: i64) -> Network {
    let mut nodes = Vec::new();
    for row in 0..=n {
        for col in 0..=n {
            nodes.push(NetworkNode {
                id: NodeId(row * 100 + col),
                lon: col as f64,
                lat: row as f64,
            });
        }
    }
    let mut ways = Vec::new();
    for row in 0..=n {
        ways.push(NetworkWay::new(
            (0..=n).map(|col| NodeId(row * 100 + col)).collect(),
        ));
    }
    for col in 0..=n {
        ways.push(NetworkWay::new(
            (0..=n).map(|row| NodeId(row * 100 + col)).collect(),
        ));
    }
    Network::new(nodes, ways).unwrap()
}

fn main() {
    let network = grid_network(8);

    // Default config: 800x600 target, margin 1.2, chain strategy.
    let mut sim = Simulation::with_render_target(
        SimConfig::default(),
        Box::new(ConsoleTarget { ticks: 0 }),
    );
    sim.start(&network).expect("build world");

    let world = sim.world().expect("running");
    println!(
        "web built: {} bodies, {} chains",
        world.body_count(),
        world.connective_count()
    );

    // Two seconds at 60 ticks per second.
    for _ in 0..120 {
        sim.step();
    }

    sim.dispose();
}
