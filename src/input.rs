//! Held-key tracking and the key bindings for camera and player.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::camera::Movement;

/// Camera bindings: WASD
const CAMERA_KEYS: [(KeyCode, Movement); 4] = [
    (KeyCode::KeyW, Movement::Forward),
    (KeyCode::KeyS, Movement::Backward),
    (KeyCode::KeyA, Movement::Left),
    (KeyCode::KeyD, Movement::Right),
];

/// Player bindings: IJKL
const PLAYER_KEYS: [(KeyCode, Movement); 4] = [
    (KeyCode::KeyI, Movement::Forward),
    (KeyCode::KeyK, Movement::Backward),
    (KeyCode::KeyJ, Movement::Left),
    (KeyCode::KeyL, Movement::Right),
];

/// Keys currently held down
#[derive(Debug, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn camera_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        self.bound(&CAMERA_KEYS)
    }

    pub fn player_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        self.bound(&PLAYER_KEYS)
    }

    fn bound<'a>(
        &'a self,
        bindings: &'a [(KeyCode, Movement)],
    ) -> impl Iterator<Item = Movement> + 'a {
        bindings
            .iter()
            .filter(|(key, _)| self.is_pressed(*key))
            .map(|(_, movement)| *movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyboardState::default();
        keys.set(KeyCode::KeyW, true);
        assert!(keys.is_pressed(KeyCode::KeyW));
        keys.set(KeyCode::KeyW, false);
        assert!(!keys.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_bindings_are_separate() {
        let mut keys = KeyboardState::default();
        keys.set(KeyCode::KeyW, true);
        keys.set(KeyCode::KeyD, true);
        keys.set(KeyCode::KeyK, true);

        let camera: Vec<_> = keys.camera_movements().collect();
        assert_eq!(camera, vec![Movement::Forward, Movement::Right]);

        let player: Vec<_> = keys.player_movements().collect();
        assert_eq!(player, vec![Movement::Backward]);

        keys.clear();
        assert_eq!(keys.camera_movements().count(), 0);
    }
}
