//! Conversions between a cell's byte buffer and its 64 field elements.

use crate::scalar::FieldElement;

pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const FIELD_ELEMENTS_PER_CELL: usize = 64;
pub const BYTES_PER_CELL: usize = FIELD_ELEMENTS_PER_CELL * BYTES_PER_FIELD_ELEMENT;

/// Reads a cell's 2048-byte buffer as 64 field elements, each a canonical
/// big-endian 32-byte slice. Any byte pattern is accepted; elements that
/// are out of canonical range are reduced, never rejected.
pub fn cell_to_field_elements(cell: &[u8; BYTES_PER_CELL]) -> [FieldElement; FIELD_ELEMENTS_PER_CELL] {
    let mut out = [FieldElement::zero(); FIELD_ELEMENTS_PER_CELL];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut buf = [0u8; BYTES_PER_FIELD_ELEMENT];
        buf.copy_from_slice(&cell[i * BYTES_PER_FIELD_ELEMENT..(i + 1) * BYTES_PER_FIELD_ELEMENT]);
        *slot = FieldElement::from_bytes_be(&buf);
    }
    out
}

/// Writes field elements right-aligned, big-endian, into consecutive
/// 32-byte slots. The output buffer is exactly `size` bytes; if `size`
/// exceeds `elems.len() * 32` the remainder is zero-filled, and if it is
/// smaller the encoding is truncated to fit.
pub fn field_elements_to_bytes(elems: &[FieldElement], size: usize) -> Vec<u8> {
    let mut out = vec![0u8; size];
    for (i, elem) in elems.iter().enumerate() {
        let start = i * BYTES_PER_FIELD_ELEMENT;
        if start >= size {
            break;
        }
        let encoded = elem.to_bytes_be();
        let end = (start + BYTES_PER_FIELD_ELEMENT).min(size);
        out[start..end].copy_from_slice(&encoded[..end - start]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_cell_of_sequential_bytes() {
        let mut cell = [0u8; BYTES_PER_CELL];
        for (i, byte) in cell.iter_mut().enumerate() {
            *byte = (i % 256) as u8;
        }
        let elems = cell_to_field_elements(&cell);
        let encoded = field_elements_to_bytes(&elems, BYTES_PER_CELL);
        assert_eq!(encoded, cell.to_vec());
    }

    #[test]
    fn pads_when_size_exceeds_input() {
        let elems = vec![FieldElement::from_u64(7)];
        let encoded = field_elements_to_bytes(&elems, 64);
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[32..], &[0u8; 32]);
    }

    #[test]
    fn truncates_when_size_is_smaller() {
        let elems = vec![FieldElement::from_u64(1), FieldElement::from_u64(2)];
        let encoded = field_elements_to_bytes(&elems, 40);
        assert_eq!(encoded.len(), 40);
    }
}
