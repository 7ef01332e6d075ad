use super::*;

#[test]
fn test_row_chunks_start_rows() {
    let width = 10;
    let height = 20;
    let mut data: Vec<usize> = vec![0; width * height];

    par_row_chunks_mut(&mut data, width).for_each(|(first_row, chunk)| {
        for (local_y, row) in chunk.chunks_mut(width).enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = (first_row + local_y) * width + x;
            }
        }
    });

    for (i, &v) in data.iter().enumerate() {
        assert_eq!(v, i);
    }
}

#[test]
fn test_row_chunks_are_row_aligned() {
    let width = 7;
    let height = 13;
    let mut data: Vec<u32> = vec![0; width * height];

    let total_rows: usize = par_row_chunks_mut(&mut data, width)
        .map(|(_, chunk)| {
            assert_eq!(chunk.len() % width, 0, "Chunk not row-aligned");
            chunk.len() / width
        })
        .sum();
    assert_eq!(total_rows, height);
}

#[test]
#[should_panic(expected = "row width must be > 0")]
fn test_row_chunks_zero_width_panics() {
    let mut data: Vec<u32> = vec![0; 4];
    par_row_chunks_mut(&mut data, 0).for_each(|_| {});
}

#[test]
#[should_panic(expected = "multiple of the row width")]
fn test_row_chunks_partial_row_panics() {
    let mut data: Vec<u32> = vec![0; 10];
    par_row_chunks_mut(&mut data, 3).for_each(|_| {});
}

#[test]
fn test_rows_per_chunk_is_positive() {
    assert_eq!(rows_per_chunk(0), 1);
    assert_eq!(rows_per_chunk(1), 1);
    assert!(rows_per_chunk(100_000) >= 1);
}

#[test]
fn test_par_for_each_row_sees_every_row_once() {
    let width = 3;
    let height = 257;
    let mut data = vec![[0.0f32; 3]; width * height];

    par_for_each_row(&mut data, width, |y, row| {
        assert_eq!(row.len(), width);
        for (x, px) in row.iter_mut().enumerate() {
            px[0] += y as f32;
            px[1] += x as f32;
            px[2] += 1.0;
        }
    });

    for y in 0..height {
        for x in 0..width {
            assert_eq!(data[y * width + x], [y as f32, x as f32, 1.0]);
        }
    }
}

#[test]
fn test_par_for_each_row_empty_is_noop() {
    let mut data: Vec<f32> = Vec::new();
    par_for_each_row(&mut data, 0, |_, _| panic!("must not be called"));
}

#[test]
fn test_par_for_each_row_large_image() {
    let width = 1920;
    let height = 1080;
    let mut data: Vec<u32> = vec![0; width * height];

    par_for_each_row(&mut data, width, |y, row| {
        for (x, v) in row.iter_mut().enumerate() {
            *v = (y * width + x) as u32;
        }
    });

    assert_eq!(data[0], 0);
    assert_eq!(data[width], width as u32);
    assert_eq!(data[width * height - 1], (width * height - 1) as u32);
}

#[test]
fn test_par_max_f32() {
    let values: Vec<f32> = (0..10_000).map(|i| ((i * 7919) % 10_007) as f32).collect();
    let expected = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(par_max_f32(&values), expected);
}

#[test]
fn test_par_max_f32_empty_and_nan() {
    assert_eq!(par_max_f32(&[]), f32::NEG_INFINITY);
    assert_eq!(par_max_f32(&[f32::NAN, 2.0, -1.0]), 2.0);
}
