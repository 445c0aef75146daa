/// # Buzzer
/// The Chip-8 has a single tone that sounds while the sound timer is nonzero.
///
/// The machine produces no audio itself; it only tells an attached buzzer
/// when the tone should start and stop. `stop_tone` fires once, on the
/// cycle the sound timer runs out or when a program zeroes it.
pub trait Buzzer {
    fn start_tone(&mut self) {}

    fn stop_tone(&mut self);
}
