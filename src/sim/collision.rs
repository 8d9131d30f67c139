//! Collision detection and response against the floor and platforms
//!
//! All tests are overlap checks at the current position, not swept. A fall
//! faster than a platform's landing band can tunnel through it.

use super::state::{Platform, Player};

/// Tolerance for "feet exactly on a surface"
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Clamp the player onto the floor if it sank into it
///
/// Returns true on contact.
pub fn resolve_floor(player: &mut Player, floor_line: f32) -> bool {
    if player.bottom() >= floor_line {
        player.stand_on(floor_line);
        player.vel.y = 0.0;
        player.grounded = true;
        return true;
    }
    false
}

/// Land on any platform whose top band contains the player's feet
///
/// The band spans from `landing_tolerance` above the platform top down to its
/// bottom edge. Returns true if any platform supports the player.
pub fn resolve_support(player: &mut Player, platforms: &[Platform], landing_tolerance: f32) -> bool {
    let mut supported = false;
    for platform in platforms {
        let bottom = player.bottom();
        if player.aabb().overlaps_x(&platform.aabb())
            && bottom >= platform.top() - landing_tolerance
            && bottom <= platform.aabb().bottom()
        {
            player.stand_on(platform.top());
            player.vel.y = 0.0;
            player.grounded = true;
            supported = true;
        }
    }
    supported
}

/// Directional resolution using the previous tick's y to tell where the player
/// came from
///
/// - from above while falling: land on top
/// - from below: bump the head and stop rising
/// - from the side: push out of a platform edge within `side_tolerance`
///
/// Returns true if the player landed on a platform top.
pub fn resolve_directional(player: &mut Player, platforms: &[Platform], side_tolerance: f32) -> bool {
    let prev_y = player.pos.y - player.vel.y;
    let mut landed = false;

    for platform in platforms {
        let bounds = platform.aabb();

        if player.aabb().overlaps_x(&bounds) {
            if prev_y + player.size.y <= bounds.top()
                && player.bottom() >= bounds.top()
                && player.vel.y >= 0.0
            {
                player.stand_on(bounds.top());
                player.vel.y = 0.0;
                landed = true;
            } else if prev_y >= bounds.bottom() && player.pos.y <= bounds.bottom() {
                player.pos.y = bounds.bottom();
                player.vel.y = 0.0;
            }
        }

        if player.aabb().overlaps_y(&bounds) {
            let right = player.pos.x + player.size.x;
            if right >= bounds.left() && right <= bounds.left() + side_tolerance {
                player.pos.x = bounds.left() - player.size.x;
            } else if player.pos.x <= bounds.right() && player.pos.x >= bounds.right() - side_tolerance {
                player.pos.x = bounds.right();
            }
        }
    }

    if landed {
        player.grounded = true;
        player.airborne = false;
    }
    landed
}

/// Whether the player's feet rest on a platform top or the floor line
pub fn is_standing(player: &Player, platforms: &[Platform], floor_line: f32) -> bool {
    let bottom = player.bottom();
    if (bottom - floor_line).abs() < CONTACT_EPSILON {
        return true;
    }
    platforms.iter().any(|platform| {
        player.aabb().overlaps_x(&platform.aabb()) && (bottom - platform.top()).abs() < CONTACT_EPSILON
    })
}
