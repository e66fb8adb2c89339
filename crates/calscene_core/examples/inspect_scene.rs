//! Example: Parse and inspect a scene source file.
//!
//! Run with: cargo run --example inspect_scene -- assets/calibration.scene
//! Add `--json` to dump the parsed definitions as JSON instead.

use std::env;

use calscene_core::{parse_source, Payload, Scene};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file> [--json]");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- assets/calibration.scene");
        println!("  RUST_LOG=debug cargo run --example inspect_scene -- assets/calibration.scene --json");
        return;
    }

    let path = &args[1];
    let as_json = args.iter().any(|a| a == "--json");

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return;
        }
    };

    let definitions = match parse_source(&content) {
        Ok(definitions) => definitions,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path, e);
            return;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&definitions) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing definitions: {}", e),
        }
        return;
    }

    let scene = Scene::from_definitions(path.as_str(), definitions);

    println!("\n=== Scene: {} ===", scene.name);
    println!("Frames: {}", scene.frame_count());
    println!("Objects: {}", scene.object_count());

    println!("\n--- Frames ---");
    for frame in scene.frames() {
        println!("  {} - {}", frame.name, frame.description);
        println!("       Transform: {}", frame.transform);
    }

    println!("\n--- Objects ---");
    for object in scene.objects() {
        print!("  {} in frame {} ({}): ", object.name, object.frame, object.format);
        match object.decode() {
            Ok(Payload::Mesh(mesh)) => println!(
                "{} vertices, {} triangles",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Ok(Payload::Bytes(bytes)) => println!("{} bytes", bytes.len()),
            Err(e) => println!("undecodable: {}", e),
        }
    }

    let problems = scene.validate();
    if !problems.is_empty() {
        println!("\n--- Problems ---");
        for problem in &problems {
            println!("  {}", problem);
        }
    }
}
