use cinelist_models::{Genre, Movie, TvSeries};

fn movie(
    id: u64,
    title: &str,
    release_date: &str,
    vote_average: f64,
    popularity: f64,
    genre_ids: &[u64],
    overview: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_title: title.to_string(),
        overview: overview.to_string(),
        poster_path: None,
        backdrop_path: None,
        release_date: Some(release_date.to_string()),
        vote_average,
        vote_count: (popularity * 150.0) as u64,
        popularity,
        genre_ids: genre_ids.to_vec(),
        adult: false,
        original_language: "en".to_string(),
        video: false,
    }
}

fn series(
    id: u64,
    name: &str,
    first_air_date: &str,
    vote_average: f64,
    popularity: f64,
    genre_ids: &[u64],
    overview: &str,
) -> TvSeries {
    TvSeries {
        id,
        name: name.to_string(),
        original_name: name.to_string(),
        overview: overview.to_string(),
        poster_path: None,
        backdrop_path: None,
        first_air_date: Some(first_air_date.to_string()),
        vote_average,
        vote_count: (popularity * 90.0) as u64,
        popularity,
        genre_ids: genre_ids.to_vec(),
        original_language: "en".to_string(),
        origin_country: vec!["US".to_string()],
    }
}

pub fn movies() -> Vec<Movie> {
    vec![
        movie(550, "Fight Club", "1999-10-15", 8.4, 61.4, &[18, 53], "An insomniac office worker and a soap salesman start an underground fight club."),
        movie(278, "The Shawshank Redemption", "1994-09-23", 8.7, 99.2, &[18, 80], "Two imprisoned men bond over a number of years."),
        movie(238, "The Godfather", "1972-03-14", 8.7, 88.1, &[18, 80], "The aging patriarch of a crime dynasty transfers control to his reluctant son."),
        movie(155, "The Dark Knight", "2008-07-16", 8.5, 92.7, &[18, 28, 80, 53], "Batman faces the Joker, a criminal mastermind who plunges Gotham into anarchy."),
        movie(680, "Pulp Fiction", "1994-09-10", 8.5, 70.3, &[53, 80], "The lives of two mob hitmen, a boxer and a pair of diner bandits intertwine."),
        movie(13, "Forrest Gump", "1994-06-23", 8.5, 64.8, &[35, 18, 10749], "A man with a low IQ witnesses and influences several historical events."),
        movie(27205, "Inception", "2010-07-15", 8.4, 95.6, &[28, 878, 12], "A thief who steals corporate secrets through dream-sharing technology."),
        movie(157336, "Interstellar", "2014-11-05", 8.4, 140.2, &[12, 18, 878], "Explorers travel through a wormhole in space to ensure humanity's survival."),
        movie(603, "The Matrix", "1999-03-30", 8.2, 85.9, &[28, 878], "A hacker learns the true nature of his reality."),
        movie(120, "The Lord of the Rings: The Fellowship of the Ring", "2001-12-18", 8.4, 101.5, &[12, 14, 28], "A hobbit sets out to destroy a powerful ring."),
        movie(769, "GoodFellas", "1990-09-12", 8.5, 48.2, &[18, 80], "The story of Henry Hill and his life in the mob."),
        movie(496243, "Parasite", "2019-05-30", 8.5, 76.0, &[35, 53, 18], "A poor family schemes to become employed by a wealthy family."),
        movie(129, "Spirited Away", "2001-07-20", 8.5, 87.7, &[16, 10751, 14], "A girl wanders into a world ruled by gods, witches and spirits."),
        movie(424, "Schindler's List", "1993-12-15", 8.6, 55.1, &[18, 36, 10752], "A businessman saves the lives of more than a thousand Jewish refugees."),
        movie(497, "The Green Mile", "1999-12-10", 8.5, 73.4, &[14, 18, 80], "A death row guard discovers an inmate has a mysterious gift."),
        movie(122, "The Lord of the Rings: The Return of the King", "2003-12-01", 8.5, 110.3, &[12, 14, 28], "The final confrontation for Middle-earth."),
        movie(98, "Gladiator", "2000-05-01", 8.2, 79.6, &[28, 18, 12], "A betrayed Roman general seeks vengeance."),
        movie(78, "Blade Runner", "1982-06-25", 7.9, 58.9, &[878, 18, 53], "A blade runner must pursue and terminate four replicants."),
        movie(105, "Back to the Future", "1985-07-03", 8.3, 67.5, &[12, 35, 878], "A teenager is accidentally sent thirty years into the past."),
        movie(1891, "The Empire Strikes Back", "1980-05-20", 8.4, 62.0, &[12, 28, 878], "The Rebels scatter after the Empire attacks their base on Hoth."),
        movie(872585, "Oppenheimer", "2023-07-19", 8.1, 190.4, &[18, 36], "The story of J. Robert Oppenheimer and the atomic bomb."),
        movie(693134, "Dune: Part Two", "2024-02-27", 8.2, 210.8, &[878, 12], "Paul Atreides unites with the Fremen on a path of revenge."),
        movie(569094, "Spider-Man: Across the Spider-Verse", "2023-05-31", 8.4, 150.1, &[16, 28, 12, 878], "Miles Morales is catapulted across the Multiverse."),
        movie(872906, "Jawan", "2023-09-07", 7.1, 45.3, &[28, 53], "A man sets out to rectify the wrongs in society."),
    ]
}

pub fn tv_series() -> Vec<TvSeries> {
    vec![
        series(1399, "Game of Thrones", "2011-04-17", 8.4, 310.5, &[10765, 18, 10759], "Noble families fight for control of the Seven Kingdoms."),
        series(1396, "Breaking Bad", "2008-01-20", 8.9, 280.2, &[18, 80], "A chemistry teacher turns to manufacturing methamphetamine."),
        series(66732, "Stranger Things", "2016-07-15", 8.6, 240.7, &[18, 10765, 9648], "A young boy vanishes and a small town uncovers a mystery."),
        series(1668, "Friends", "1994-09-22", 8.4, 190.3, &[35, 18], "Six friends navigate life and love in New York City."),
        series(94605, "Arcane", "2021-11-06", 8.7, 150.8, &[16, 18, 10765, 10759], "Two sisters find themselves on opposing sides of a war."),
        series(100088, "The Last of Us", "2023-01-15", 8.6, 260.1, &[18], "A smuggler escorts a teenage girl across a ravaged America."),
        series(60059, "Better Call Saul", "2015-02-08", 8.7, 120.4, &[80, 18], "The trials of a small-time lawyer."),
        series(1418, "The Big Bang Theory", "2007-09-24", 7.9, 200.9, &[35], "Two physicists' lives change when a waitress moves in across the hall."),
        series(76479, "The Boys", "2019-07-25", 8.5, 220.6, &[10765, 10759], "Vigilantes set out to take down corrupt superheroes."),
        series(82856, "The Mandalorian", "2019-11-12", 8.5, 170.2, &[10765, 10759, 18], "A lone gunfighter makes his way through the outer reaches of the galaxy."),
        series(87108, "Chernobyl", "2019-05-06", 8.7, 90.5, &[18], "The 1986 nuclear disaster and the cleanup efforts that followed."),
        series(1438, "The Wire", "2002-06-02", 8.6, 80.3, &[80, 18], "The Baltimore drug scene, seen through drug dealers and law enforcement."),
    ]
}

pub fn movie_genres() -> Vec<Genre> {
    genres(&[
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ])
}

pub fn tv_genres() -> Vec<Genre> {
    genres(&[
        (10759, "Action & Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (10762, "Kids"),
        (9648, "Mystery"),
        (10763, "News"),
        (10764, "Reality"),
        (10765, "Sci-Fi & Fantasy"),
        (10766, "Soap"),
        (10767, "Talk"),
        (10768, "War & Politics"),
        (37, "Western"),
    ])
}

fn genres(pairs: &[(u64, &str)]) -> Vec<Genre> {
    pairs
        .iter()
        .map(|(id, name)| Genre { id: *id, name: name.to_string() })
        .collect()
}
