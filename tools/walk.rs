//! Walk: interactive terminal traversal of the game map.
//!
//! Usage: walk
//!
//! Commands:
//!   look                    describe the current node
//!   left | right | forward  follow an edge; any other word also goes right,
//!                           just like the web game
//!   go <id>                 jump to a node
//!   map                     list every node and its edges
//!   help                    list commands
//!   quit                    exit

use branching_game::core::graph::GameMap;
use branching_game::schema::node::{Direction, Node};
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    let map = match GameMap::standard() {
        Ok(map) => map,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let Some(start) = map.start() else {
        eprintln!("ERROR: map has no start node");
        process::exit(1);
    };

    println!("Loaded {} nodes", map.len());
    println!("Type 'help' for commands.\n");

    let mut current: &Node = start;
    describe(&map, current);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("walk> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "look" | "l" => describe(&map, current),
            "map" => {
                for node in map.nodes() {
                    println!("  {}", edge_summary(node));
                }
            }
            "go" => {
                if parts.len() < 2 {
                    println!("Usage: go <id>");
                    continue;
                }
                match map.lookup(parts[1]) {
                    Some(node) => {
                        current = node;
                        describe(&map, current);
                    }
                    None => println!("invalid node: {}", parts[1]),
                }
            }
            token => {
                let direction = Direction::from_token(token);
                match map.step(current, direction) {
                    Some(next) => {
                        current = next;
                        describe(&map, current);
                    }
                    None => println!("There is no path {} from {}.", direction, current.id),
                }
            }
        }
    }
}

fn describe(map: &GameMap, node: &Node) {
    if map.is_winner(node) {
        println!("*** You reached {}. You win! ***", node.id);
        return;
    }
    println!("{}", edge_summary(node));
}

fn edge_summary(node: &Node) -> String {
    let edges: Vec<String> = node
        .edges()
        .map(|(direction, target)| format!("{}={}", direction, target))
        .collect();
    if edges.is_empty() {
        format!("[{}] dead end", node.id)
    } else {
        format!("[{}] {}", node.id, edges.join(" "))
    }
}

fn print_help() {
    println!("Commands:");
    println!("  look                    describe the current node");
    println!("  left | right | forward  follow an edge");
    println!("  go <id>                 jump to a node");
    println!("  map                     list every node and its edges");
    println!("  help                    show this help");
    println!("  quit                    exit");
}
