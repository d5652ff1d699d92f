mod cli;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use hashbrown::HashMap;
use tombforge_geom::{Ray, Vec3};
use tombforge_level::{Level, LevelDesc, RoomId};
use tombforge_mesh_cpu::ray_intersects_geometry;
use tombforge_runtime::{BakeConfig, RoomUpdater};

use crate::cli::{BakeArgs, Cli, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Bake(args) => run_bake(&args),
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn load(args: &BakeArgs) -> Result<(Level, BakeConfig), Box<dyn Error>> {
    let desc = LevelDesc::from_path(&args.level)?;
    let level = desc.build()?;
    let config = match &args.config {
        Some(path) => BakeConfig::from_path(path)?,
        None => BakeConfig::default(),
    };
    Ok((level, config))
}

fn run_bake(args: &BakeArgs) -> Result<(), Box<dyn Error>> {
    bake_once(args)?;
    if args.watch {
        watch(args)?;
    }
    Ok(())
}

fn bake_once(args: &BakeArgs) -> Result<(), Box<dyn Error>> {
    let (level, config) = load(args)?;
    let mut updater = RoomUpdater::new(config);
    let report = updater.update_all(&level);
    log::info!(
        "{}: {} rooms, {} vertices (mesh {} ms, light {} ms, buffer {} ms)",
        args.level.display(),
        report.rooms.len(),
        report.vertices,
        report.t_mesh_ms,
        report.t_light_ms,
        report.t_buffer_ms
    );
    for (id, room) in level.rooms() {
        print_room_summary(&updater, id, &room.name);
    }

    if args.pick.is_some() || args.height.is_some() {
        let target = match &args.room {
            Some(name) => level.find_room(name)?,
            None => level.rooms().next().map(|(id, _)| id).ok_or("level has no rooms")?,
        };
        if let Some([x, y, z, dx, dy, dz]) = args.pick {
            pick(&updater, target, Vec3::new(x, y, z), Vec3::new(dx, dy, dz));
        }
        if let Some([x, z]) = args.height {
            let room = level.room(target).ok_or("room vanished")?;
            match room.height_at_point_with(x, z, args.combine.into()) {
                Some(span) => println!(
                    "height at ({x},{z}) in `{}`: floor {} ceiling {} clearance {}",
                    room.name,
                    span.floor,
                    span.ceiling,
                    span.clearance()
                ),
                None => println!("height at ({x},{z}) in `{}`: no open sector", room.name),
            }
        }
    }
    Ok(())
}

fn print_room_summary(updater: &RoomUpdater, id: RoomId, name: &str) {
    let (Some(geometry), Some(buffer)) = (updater.geometry(id), updater.buffer(id)) else {
        return;
    };
    let mut by_kind: HashMap<&'static str, usize> = HashMap::new();
    for (_, _, face, _) in geometry.faces() {
        let kind = if face.is_floor() {
            "floor"
        } else if face.is_ceiling() {
            "ceiling"
        } else {
            "wall"
        };
        *by_kind.entry(kind).or_default() += 1;
    }
    let n = buffer.vertex_count().max(1) as f32;
    let mean = buffer
        .colors()
        .chunks_exact(4)
        .fold(0.0, |acc, c| acc + (c[0] + c[1] + c[2]) / 3.0)
        / n;
    let b = geometry.bounds();
    println!(
        "{name:>12}: {:>6} vertices, {:>4} floor, {:>4} ceiling, {:>4} wall faces, mean light {mean:.3}",
        buffer.vertex_count(),
        by_kind.get("floor").copied().unwrap_or(0),
        by_kind.get("ceiling").copied().unwrap_or(0),
        by_kind.get("wall").copied().unwrap_or(0),
    );
    if !b.is_empty() {
        println!(
            "{:>12}  y {:.0}..{:.0}, footprint {:.0} x {:.0}",
            "",
            b.min.y,
            b.max.y,
            b.max.x - b.min.x,
            b.max.z - b.min.z
        );
    }
}

fn pick(updater: &RoomUpdater, room: RoomId, origin: Vec3, dir: Vec3) {
    let Some(geometry) = updater.geometry(room) else {
        return;
    };
    match ray_intersects_geometry(geometry, &Ray::new(origin, dir)) {
        Some(hit) => println!(
            "pick: {:?} of sector ({},{}) at distance {:.1}",
            hit.face, hit.x, hit.z, hit.distance
        ),
        None => println!("pick: no hit"),
    }
}

fn watch(args: &BakeArgs) -> Result<(), Box<dyn Error>> {
    use notify::{EventKind, RecursiveMode, Watcher};

    let (tx, rx) = crossbeam_channel::unbounded::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            if matches!(
                event.kind,
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any
            ) {
                let _ = tx.send(());
            }
        }
    })?;
    let mut watched: Vec<&Path> = vec![args.level.as_path()];
    if let Some(cfg) = &args.config {
        watched.push(cfg.as_path());
    }
    for path in &watched {
        watcher.watch(path, RecursiveMode::NonRecursive)?;
    }
    log::info!("watching {} file(s); Ctrl-C to stop", watched.len());

    while rx.recv().is_ok() {
        // Coalesce a burst of events into one re-bake.
        while rx.recv_timeout(Duration::from_millis(150)).is_ok() {}
        if let Err(e) = bake_once(args) {
            log::warn!("re-bake failed: {e}");
        }
    }
    Ok(())
}
