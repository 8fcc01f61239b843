use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::RoomError;

/// Draws a fresh gift assignment over `ids`: a random permutation forming a
/// single cycle, so the result never maps a participant to themselves and
/// needs no retry loop.
pub fn draw(ids: &[u32]) -> Result<HashMap<u32, u32>, RoomError> {
    draw_with(&mut rand::thread_rng(), ids)
}

/// Same as [`draw`] but over a caller-supplied rng, so tests can seed it.
///
/// The first id stays in place and only the remaining n-1 are shuffled;
/// reading successor pairs off that order picks uniformly among the (n-1)!
/// single cycles. A full shuffle of all n ids would sometimes split into
/// several cycles, some of length 1.
pub fn draw_with<R: Rng + ?Sized>(rng: &mut R, ids: &[u32]) -> Result<HashMap<u32, u32>, RoomError> {
    if ids.len() < 2 {
        return Err(RoomError::NotEnoughParticipants);
    }

    let mut cycle = ids.to_vec();
    cycle[1..].shuffle(rng);

    let mut assignment = HashMap::with_capacity(cycle.len());
    for (i, &giver) in cycle.iter().enumerate() {
        let receiver = cycle[(i + 1) % cycle.len()];
        assignment.insert(giver, receiver);
    }

    Ok(assignment)
}
