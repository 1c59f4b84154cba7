use grid_util::Point;
use grid_wavefront::{EditIntent, Mode, SearchEngine};

// In this example a path is traced on a 5x4 grid with shape
//  _____
// |S    |
// | ### |
// |   # |
// |    E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// The grid is printed after every tick, the way a front end would redraw it once per frame.

fn main() {
    let mut engine = SearchEngine::new(5, 4).unwrap();
    for p in [
        Point::new(1, 1),
        Point::new(2, 1),
        Point::new(3, 1),
        Point::new(3, 2),
    ] {
        engine.edit(p, EditIntent::Block).unwrap();
    }
    engine.edit(Point::new(0, 0), EditIntent::SetStart).unwrap();
    engine.edit(Point::new(4, 3), EditIntent::SetEnd).unwrap();
    engine.start().unwrap();
    println!("{}", engine);
    while engine.tick() != Mode::Finished {
        println!("{}", engine);
        if engine.mode() == Mode::NoPathFound {
            println!("No path");
            return;
        }
    }
    println!("{}", engine);
    println!("Path:");
    for p in engine.path().unwrap_or_default() {
        println!("{:?}", p);
    }
}
