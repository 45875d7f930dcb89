use std::io::BufReader;

use massing_codec::{DecodeParams, decode};
use massing_grid::{CellState, IVec3};
use massing_io::{
    PngDirSink, SampleSetParams, generate_samples, load_raster, parse_config, read_cells,
    write_cells,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn saved_sample_decodes_back_to_its_layout() {
    let cfg = parse_config(
        "seed = 3\n[grid]\nsize = { x = 12, y = 4, z = 9 }\n[samples]\ncount = 1\n",
    )
    .unwrap();
    let mut grid = cfg.grid.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = PngDirSink::create(tmp.path()).unwrap();
    let params = SampleSetParams::from(&cfg.samples);
    generate_samples(&mut grid, &mut StdRng::seed_from_u64(cfg.seed), &params, &mut sink).unwrap();
    let footprint: Vec<(i32, i32)> = grid
        .active_cells()
        .filter(|c| c.coord().y == 0 && c.state() == CellState::Solid)
        .map(|c| (c.coord().x, c.coord().z))
        .collect();

    let image = load_raster(&sink.dir().join("sample_0000.png")).unwrap();
    let active = grid.active_size();
    let square = image.unfit_square(active.x as usize, active.z as usize).unwrap();
    grid.clear();
    let decode_params = DecodeParams {
        sensitivity: 0.0,
        include_solid_pixels: true,
        ..Default::default()
    };
    let report = decode(&mut grid, &square, &decode_params).unwrap();
    assert_eq!(report.solid_columns, footprint.len());
    for (x, z) in footprint {
        for y in 1..active.y {
            assert_eq!(grid.state_at(IVec3::new(x, y, z)).unwrap(), CellState::Solid);
        }
    }
}

proptest! {
    // Exported records parse back to exactly the exported cells
    #[test]
    fn export_round_trips(marks in prop::collection::vec((0i32..6, 1i32..4, 0i32..5, any::<bool>()), 0..30)) {
        let cfg = parse_config("[grid]\nsize = { x = 6, y = 4, z = 5 }\n").unwrap();
        let mut grid = cfg.grid.build().unwrap();
        for (x, y, z, solid) in marks {
            let st = if solid { CellState::Solid } else { CellState::Flagged };
            grid.set_state(IVec3::new(x, y, z), st).unwrap();
        }
        let states = [CellState::Flagged, CellState::Solid];
        let mut buf = Vec::new();
        let n = write_cells(&grid, &states, &mut buf).unwrap();
        let back = read_cells(BufReader::new(buf.as_slice())).unwrap();
        prop_assert_eq!(back.len(), n);
        let expected: Vec<(IVec3, CellState)> = grid
            .active_cells()
            .filter(|c| states.contains(&c.state()))
            .map(|c| (c.coord(), c.state()))
            .collect();
        prop_assert_eq!(back, expected);
    }
}
