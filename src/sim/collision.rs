//! Collision detection and response for walls, bricks, and the paddle
//!
//! The tricky part of Brickfall: the ball moves one combined displacement
//! per tick, which collapses both degrees of freedom into a single sample.
//! When that sample lands in a brick, the resolver probes each axis in
//! isolation to infer which velocity component caused the overlap, instead
//! of running a full swept-AABB solve.

use glam::Vec2;

use super::state::{BrickGrid, Moving, Rect, paddle_rect};
use super::tick::TickEvent;
use crate::consts::*;

/// Resolve one tick of ball motion against walls, bricks, and the paddle.
///
/// Called with the ball's committed pre-tick state; mutates its velocity as
/// collisions demand and returns the final position to commit. At most one
/// brick is destroyed per call.
pub fn resolve_ball(
    ball: &mut Moving,
    moved_paddle: Vec2,
    bricks: &mut BrickGrid,
    bounded_top: bool,
    events: &mut Vec<TickEvent>,
) -> Vec2 {
    let mut moved = ball.moved();

    // Vertical walls always bound the field; the ceiling only in the
    // endless variant - the leveled game lets the ball arc above the
    // playfield and fall back in.
    if moved.x <= 0.0 || moved.x >= GAME_W {
        ball.vel.x = -ball.vel.x;
        moved = ball.moved();
        events.push(TickEvent::WallBounce);
    }
    if bounded_top && moved.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        moved = ball.moved();
        events.push(TickEvent::WallBounce);
    }

    if let Some(cell) = bricks.cell_index(moved).filter(|&i| bricks.is_present(i)) {
        // Axis-isolated probes: advance one coordinate at a time. If pure
        // vertical motion alone would not have reached a brick, the
        // horizontal component caused the overlap, so that is the axis to
        // reflect - and symmetrically for the other probe. A corner hit
        // fires both. When both probes land on *other* bricks, neither
        // fires and the ball passes through; the struck brick still falls.
        let only_y = Vec2::new(ball.pos.x, moved.y);
        let only_x = Vec2::new(moved.x, ball.pos.y);
        let flip_x = !bricks.brick_at(only_y);
        let flip_y = !bricks.brick_at(only_x);
        if flip_x {
            ball.vel.x = -ball.vel.x;
        }
        if flip_y {
            ball.vel.y = -ball.vel.y;
        }
        moved = ball.moved();
        log::debug!("brick {cell} struck (flip_x: {flip_x}, flip_y: {flip_y})");
        if bricks.destroy(cell) {
            events.push(TickEvent::BrickBroken);
        }
    } else if ball.vel.y > 0.0 {
        // Paddle responds only to a falling ball; an upward ball passes
        // through. The rectangle is widened a unit per side and tested
        // against the whole swept segment so a fast ball cannot tunnel.
        let rect = paddle_rect(moved_paddle).widened(PADDLE_GRACE);
        if segment_hits_rect(ball.pos, moved, &rect) {
            // Assign, not reflect: bounce angle comes from the offset to
            // the paddle center, giving the player directional control.
            ball.vel.x = (moved.x - moved_paddle.x) / BOUNCE_CONTROL;
            ball.vel.y = LAUNCH_VY;
            moved = ball.moved();
            events.push(TickEvent::PaddleBounce);
        }
    }

    moved
}

/// Does the segment `p0 -> p1` intersect `rect`? Liang-Barsky parameter
/// clip; endpoints inside the rectangle count as hits.
pub fn segment_hits_rect(p0: Vec2, p1: Vec2, rect: &Rect) -> bool {
    let d = p1 - p0;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    let edges = [
        (-d.x, p0.x - rect.min.x),
        (d.x, rect.max.x - p0.x),
        (-d.y, p0.y - rect.min.y),
        (d.y, rect.max.y - p0.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // parallel to this edge: outside means no intersection at all
            if q < 0.0 {
                return false;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }
    true
}
