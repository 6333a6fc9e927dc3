use log::info;
use zorder_index::{IdAllocator, ZOrderIndex};

fn main() {
    env_logger::init();

    let mut ids = IdAllocator::new();
    let points = vec![
        (0.0, 0.0),
        (6.0, 6.0),
        (20.0, 30.0),
        (20.0, 40.0),
        (65535.0, 65535.0),
    ];
    let entities: Vec<_> = points.iter().map(|_| ids.allocate()).collect();

    let mut index = ZOrderIndex::new();
    index.build(&points);

    let (p0, p1) = ((8.0, 8.0), (127.0, 100.0));
    let trace = index.query_traced(p0, p1);
    info!("query {:?} - {:?} on grid {:?}, snapped to {:?}", p0, p1, trace.rect, trace.snapped);
    info!("hull {:?} split into {} ranges", trace.hull, trace.ranges.len());
    for range in &trace.ranges {
        info!("  {:#010x}..={:#010x} ({} codes)", range.lo, range.hi, range.len());
    }
    for &position in &trace.matches {
        if let (Some(i), Some(cell)) = (index.original_index(position), index.grid_position(position)) {
            println!("found: {:?} at cell {:?} (entity {})", points[i], cell, entities[i].0);
        }
    }
}
