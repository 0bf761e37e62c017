use super::domain::RoomState;

/// First room with spare capacity under ascending room-number order.
/// Room numbers are zero-padded within a hostel, so the lexicographic order
/// matches the numeric one and repeated runs pick rooms identically.
/// `None` signals "try the next candidate hostel", not an error.
pub fn select_room(rooms: &[RoomState]) -> Option<&RoomState> {
    rooms
        .iter()
        .filter(|room| room.has_vacancy())
        .min_by(|a, b| a.room_number.cmp(&b.room_number))
}
